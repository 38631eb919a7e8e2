//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `validation` - Assessment request validation

pub mod validation;

pub use validation::SchemaInputValidator;
