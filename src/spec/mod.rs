//! Target OpenAPI document handling.
//!
//! The generator owns exactly two members of the document:
//! `components.schemas` and `paths`. Everything else (`info`, `servers`,
//! `components.parameters`, ...) is hand-maintained and carried through a
//! run untouched.

mod load;

pub use load::*;
