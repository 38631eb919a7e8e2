//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Validation Ports
//!
//! - `InputValidator` - Shape and range checks on an assessment request

mod input_validator;

pub use input_validator::{InputValidationError, InputValidator};
