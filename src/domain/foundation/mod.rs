//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the nodule assessment domain.

mod clinical_context;
mod errors;
mod guideline;
mod ids;
mod measurement;
mod probability;
mod timestamp;

pub use clinical_context::ClinicalContext;
pub use errors::ValidationError;
pub use guideline::{GuidelineId, GuidelineVersion};
pub use ids::AssessmentId;
pub use measurement::{
    is_positive_measurement, round_to_nearest_mm, MAX_DIAMETER_MM, MIN_DIAMETER_MM,
};
pub use probability::{Probability, RiskBand, HIGH_RISK_FLOOR, LOGISTIC_FLOOR, LOW_RISK_CEILING};
pub use timestamp::Timestamp;
