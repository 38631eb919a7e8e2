//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod assessment;

pub use assessment::{
    AssessNoduleCommand, AssessNoduleHandler, AssessNoduleResult, AssessmentError,
    RunValidationCasesCommand, RunValidationCasesHandler,
};
