//! # CLI Module
//!
//! Command-line front end for the generator, shipped as the
//! `xpdo-openapi-gen` binary.
//!
//! ## Commands
//!
//! ### `build` (default)
//!
//! Regenerate `components.schemas` and `paths` in the target document:
//!
//! ```bash
//! xpdo-openapi-gen build --spec spec/openapi.json
//! ```
//!
//! Options:
//! - `--config <FILE>` - Build configuration (default: `xpdo-openapi.toml` when present)
//! - `--spec <FILE>` - Target OpenAPI document
//! - `--schema <FILE>` - Schema file; repeat to process several in order
//! - `--dry-run` - Do everything except write the document
//!
//! One line per skipped entity is printed to stdout, followed by a summary.
//! Logs go to stderr.
//!
//! ### `inspect`
//!
//! Show the title, URI and outcome for every entity without touching the
//! document:
//!
//! ```bash
//! xpdo-openapi-gen inspect --schema core/model/schema/modx.mysql.schema.xml
//! ```

mod commands;


pub use commands::{
    resolve_config, run_build, run_cli, run_inspect, BuildArgs, BuildSummary, Cli, Commands, EntityStatus,
    InspectRow, SourceArgs,
};
