//! # Schema Module
//!
//! Reads xPDO XML schema files into plain entity records and exposes the
//! field/index metadata the generator consumes.
//!
//! ```text
//! schema.xml → load_schema_file → SchemaFile { package, entities }
//!                                       │
//!                     SchemaMetadata::from_files (inheritance resolved)
//!                                       │
//!                          MetadataSource::field_meta / index_meta
//! ```

mod load;
mod meta;
mod types;

#[cfg(test)]
mod tests;

pub use load::*;
pub use meta::*;
pub use types::*;
