//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! It is the only layer besides the adapters that logs.

pub mod handlers;

pub use handlers::{
    AssessNoduleCommand, AssessNoduleHandler, AssessNoduleResult, AssessmentError,
    RunValidationCasesCommand, RunValidationCasesHandler,
};
