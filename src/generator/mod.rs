//! # Generator Module
//!
//! Turns entity metadata into OpenAPI 3 component schemas and CRUD paths.
//!
//! ## Overview
//!
//! For every table-backed entity the generator produces:
//! - **Object schema** - `components.schemas.{class}` with one property per field
//! - **Collection schema** - `components.schemas.{class}Collection` wrapping `total` and `data`
//! - **Collection path** - `{uri}` with `get` (list) and `post` (create)
//! - **Item path** - `{uri}/{id}` with `get`, `put` and `delete`
//!
//! ## Architecture
//!
//! ```text
//! SchemaFile → SpecAssembler ─┬─ naming     (title, URI)
//!                             ├─ schema     (object + collection schemas)
//!                             │     └─ types (phptype → JSON Schema type)
//!                             └─ overrides  (nested routes) ─ paths (default CRUD set)
//! ```
//!
//! 1. **Naming** - `modTemplateVar` becomes `Template Var` and `/template-var`
//! 2. **Schema** - field metadata becomes typed properties with coerced defaults
//! 3. **Paths** - the default CRUD set, with secondary indices as list filters
//! 4. **Overrides** - per-class rewrites such as `/context/{contextKey}/setting`
//!
//! Everything here is pure: no I/O, no global state. The assembler returns a
//! [`BuildOutput`] that the caller merges into the target document.
//!
//! ## Usage
//!
//! ```rust
//! use xpdo_openapi::generator::{OverrideRegistry, SpecAssembler};
//! use xpdo_openapi::schema::{FieldMeta, InMemoryMetadata, SchemaFile, EntityDefinition};
//!
//! let metadata = InMemoryMetadata::new().with_class(
//!     "modCategory",
//!     vec![FieldMeta::new("category", "string", "")],
//!     vec![],
//! );
//! let overrides = OverrideRegistry::with_defaults();
//! let file = SchemaFile {
//!     package: "modx".to_string(),
//!     entities: vec![EntityDefinition {
//!         class_name: "modCategory".to_string(),
//!         table: "categories".to_string(),
//!         ..Default::default()
//!     }],
//! };
//!
//! let output = SpecAssembler::new(&metadata, &overrides).assemble(&[file]);
//! assert!(output.schemas.contains_key("modCategoryCollection"));
//! assert!(output.paths.contains_key("/category/{id}"));
//! ```

mod assemble;
mod naming;
mod overrides;
mod paths;
mod schema;
mod types;

pub use assemble::*;
pub use naming::*;
pub use overrides::*;
pub use paths::*;
pub use schema::*;
pub use types::*;
