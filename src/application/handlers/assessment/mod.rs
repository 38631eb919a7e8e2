//! Assessment handlers.
//!
//! - `AssessNoduleHandler` - Validate, classify and compute risk models
//! - `RunValidationCasesHandler` - Run a reference case package

mod assess_nodule;
mod run_validation_cases;

pub use assess_nodule::{
    AssessNoduleCommand, AssessNoduleHandler, AssessNoduleResult, AssessmentError,
};
pub use run_validation_cases::{RunValidationCasesCommand, RunValidationCasesHandler};
