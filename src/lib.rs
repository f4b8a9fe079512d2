//! # xpdo-openapi
//!
//! Generates OpenAPI 3 component schemas and CRUD paths from xPDO XML entity
//! schemas and merges them into an existing, hand-maintained OpenAPI
//! document.
//!
//! ## Overview
//!
//! Every table-backed entity in the schema files becomes:
//!
//! - an object schema with one typed property per field (inherited fields included)
//! - a `{class}Collection` schema wrapping `total` and a `data` array
//! - a collection path (`get` list, `post` create) and an item path
//!   (`get`, `put`, `delete`)
//!
//! Entities that only make sense below a parent resource (context settings,
//! dashboard widget placements, ...) have their paths rewritten by an
//! [`OverrideRegistry`](generator::OverrideRegistry).
//!
//! ## Architecture
//!
//! - **[`schema`]** - XML schema parsing and field/index metadata with inheritance
//! - **[`generator`]** - type mapping, naming, schema and path generation, overrides
//! - **[`spec`]** - loading, merging and writing the target OpenAPI document
//! - **[`config`]** - TOML build configuration and environment overrides
//! - **[`cli`]** - the `xpdo-openapi-gen` command line
//! - **[`logging`]** - tracing subscriber setup
//! - **[`error`]** - errors that abort a run
//!
//! ### Build Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(xpdo-openapi-gen)
//!     participant Schema as schema::load_schema_file
//!     participant Meta as schema::SchemaMetadata
//!     participant Asm as generator::SpecAssembler
//!     participant Spec as spec
//!     participant FS as File System
//!
//!     CLI->>Schema: parse every configured schema file
//!     Schema-->>CLI: Vec<SchemaFile>
//!     CLI->>Meta: from_files(&files)
//!     CLI->>Asm: assemble(&files)
//!     Asm->>Meta: field_meta / index_meta per entity
//!     Asm-->>CLI: BuildOutput { schemas, paths, skipped }
//!     CLI->>Spec: load_spec_document(path)
//!     Spec-->>CLI: existing document (or fatal error)
//!     CLI->>Spec: merge_build_output + write_spec_document
//!     Spec->>FS: temp file, rename over target
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use xpdo_openapi::cli::run_build;
//! use xpdo_openapi::config::BuildConfig;
//!
//! let config = BuildConfig::default().with_env_overrides();
//! let summary = run_build(&config, false, &mut std::io::stdout()).expect("build failed");
//! println!("{} paths", summary.paths);
//! ```
//!
//! The generated members are `components.schemas` and `paths`. Everything
//! else in the document (`info`, `servers`, `components.parameters`) is
//! preserved as it was.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod schema;
pub mod spec;

pub use error::BuildError;
pub use generator::{BuildOutput, OverrideRegistry, SpecAssembler};
pub use schema::{MetadataSource, SchemaMetadata};
