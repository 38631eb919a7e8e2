//! Schema Input Validator - Implementation of InputValidator.
//!
//! Checks an assessment request against the input schema: numeric ranges,
//! context-dependent required fields and paired optional fields. Every
//! violation is collected before returning.

use tracing::warn;

use crate::domain::foundation::{ClinicalContext, MAX_DIAMETER_MM, MIN_DIAMETER_MM};
use crate::domain::nodule::{
    AssessmentInput, NoduleCharacteristics, PatientProfile, ScanType, ScreeningExtension,
    SteppedManagementState,
};
use crate::ports::{InputValidationError, InputValidator};

/// Oldest accepted patient age.
pub const MAX_AGE_YEARS: f64 = 120.0;

pub const MESSAGE_DIAMETER_RANGE: &str = "Enter diameter between 1-100 mm";
pub const MESSAGE_SOLID_COMPONENT_RANGE: &str = "Enter solid component between 0-100 mm";
pub const MESSAGE_AGE_POSITIVE: &str = "Age must be positive";
pub const MESSAGE_AGE_MAXIMUM: &str = "Enter age of 120 years or less";
pub const MESSAGE_PRIOR_DIAMETER_NEGATIVE: &str = "Prior diameter cannot be negative";
pub const MESSAGE_PRIOR_INTERVAL_NEGATIVE: &str = "Prior scan interval cannot be negative";
pub const MESSAGE_NODULE_COUNT: &str = "Nodule count must be at least 1";
pub const MESSAGE_RISK_LEVEL_REQUIRED: &str = "Risk level is required for Fleischner";
pub const MESSAGE_SCAN_TYPE_REQUIRED: &str = "Scan type is required for Lung-RADS";
pub const MESSAGE_FOLLOW_UP_PRIOR_REQUIRED: &str =
    "Prior diameter and interval are required for follow-up scans";
pub const MESSAGE_STEPPED_STATE_PAIRED: &str =
    "Prior category and prior status must be provided together";

/// Schema-based validator implementation.
///
/// # Thread Safety
///
/// This struct is `Send + Sync` and can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct SchemaInputValidator {
    require_risk_level: bool,
}

impl Default for SchemaInputValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaInputValidator {
    /// Create a validator that requires the risk level for incidental findings.
    pub fn new() -> Self {
        Self {
            require_risk_level: true,
        }
    }

    /// Toggle the incidental risk-level requirement.
    pub fn with_require_risk_level(mut self, required: bool) -> Self {
        self.require_risk_level = required;
        self
    }

    pub fn requires_risk_level(&self) -> bool {
        self.require_risk_level
    }

    // =========================================================================
    // Section validators
    // =========================================================================

    fn validate_patient(&self, patient: &PatientProfile, errors: &mut Vec<InputValidationError>) {
        if !(patient.age.is_finite() && patient.age >= 0.0) {
            errors.push(InputValidationError::field("patient.age", MESSAGE_AGE_POSITIVE));
        } else if patient.age > MAX_AGE_YEARS {
            errors.push(InputValidationError::field("patient.age", MESSAGE_AGE_MAXIMUM));
        }

        if self.require_risk_level
            && patient.clinical_context == ClinicalContext::Incidental
            && patient.risk_level.is_none()
        {
            errors.push(InputValidationError::field(
                "patient.risk_level",
                MESSAGE_RISK_LEVEL_REQUIRED,
            ));
        }
    }

    fn validate_nodule(nodule: &NoduleCharacteristics, errors: &mut Vec<InputValidationError>) {
        if !in_range(nodule.diameter_mm, MIN_DIAMETER_MM, MAX_DIAMETER_MM) {
            errors.push(InputValidationError::field(
                "nodule.diameter_mm",
                MESSAGE_DIAMETER_RANGE,
            ));
        }

        if let Some(solid) = nodule.solid_component_mm {
            if !in_range(solid, 0.0, MAX_DIAMETER_MM) {
                errors.push(InputValidationError::field(
                    "nodule.solid_component_mm",
                    MESSAGE_SOLID_COMPONENT_RANGE,
                ));
            }
        }

        if nodule.nodule_count == Some(0) {
            errors.push(InputValidationError::field(
                "nodule.nodule_count",
                MESSAGE_NODULE_COUNT,
            ));
        }
    }

    fn validate_screening(
        context: ClinicalContext,
        screening: Option<&ScreeningExtension>,
        errors: &mut Vec<InputValidationError>,
    ) {
        let Some(screening) = screening else {
            if context.is_screening() {
                errors.push(InputValidationError::field(
                    "screening.scan_type",
                    MESSAGE_SCAN_TYPE_REQUIRED,
                ));
            }
            return;
        };

        if let Some(prior) = screening.prior_diameter_mm {
            if !(prior.is_finite() && prior >= 0.0) {
                errors.push(InputValidationError::field(
                    "screening.prior_diameter_mm",
                    MESSAGE_PRIOR_DIAMETER_NEGATIVE,
                ));
            }
        }

        if let Some(months) = screening.prior_scan_months_ago {
            if !(months.is_finite() && months >= 0.0) {
                errors.push(InputValidationError::field(
                    "screening.prior_scan_months_ago",
                    MESSAGE_PRIOR_INTERVAL_NEGATIVE,
                ));
            }
        }

        if context.is_screening()
            && screening.scan_type == ScanType::FollowUp
            && (screening.prior_diameter_mm.is_none() || screening.prior_scan_months_ago.is_none())
        {
            errors.push(InputValidationError::field(
                "screening",
                MESSAGE_FOLLOW_UP_PRIOR_REQUIRED,
            ));
        }
    }

    fn validate_stepped_management(
        state: Option<&SteppedManagementState>,
        errors: &mut Vec<InputValidationError>,
    ) {
        if state.is_some_and(SteppedManagementState::is_partial) {
            errors.push(InputValidationError::field(
                "stepped_management",
                MESSAGE_STEPPED_STATE_PAIRED,
            ));
        }
    }
}

impl InputValidator for SchemaInputValidator {
    fn validate(&self, input: &AssessmentInput) -> Result<(), InputValidationError> {
        let mut errors = Vec::new();

        self.validate_patient(&input.patient, &mut errors);
        Self::validate_nodule(&input.nodule, &mut errors);
        Self::validate_screening(
            input.patient.clinical_context,
            input.screening.as_ref(),
            &mut errors,
        );
        Self::validate_stepped_management(input.stepped_management.as_ref(), &mut errors);

        match InputValidationError::collect(errors) {
            None => Ok(()),
            Some(err) => {
                warn!(
                    error_count = err.error_count(),
                    context = ?input.patient.clinical_context,
                    "Assessment input failed validation"
                );
                Err(err)
            }
        }
    }
}

/// Finite and within the closed range.
fn in_range(value: f64, min: f64, max: f64) -> bool {
    value.is_finite() && value >= min && value <= max
}
