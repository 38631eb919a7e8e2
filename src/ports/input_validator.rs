//! Input Validator Port - Assessment request validation interface.
//!
//! The classifiers assume well-formed input. This port is the seam where an
//! assessment request is checked for shape and range before it reaches them.
//! Adapters (like `SchemaInputValidator`) provide the implementation.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::nodule::AssessmentInput;

/// Port for validating assessment requests.
///
/// # Contract
///
/// Implementations must:
/// - Report every violation, not just the first one found
/// - Name each violation by its field path (e.g. `nodule.diameter_mm`)
/// - Never reject a record the classifiers can handle with a warning
///   (a solid component larger than the diameter is a warning, not an error)
///
/// # Usage
///
/// ```rust,ignore
/// let validator: &dyn InputValidator = get_validator();
///
/// validator.validate(&input)?;
/// let result = GuidelineRouter::classify(&input);
/// ```
pub trait InputValidator: Send + Sync {
    /// Validate an assessment request.
    ///
    /// Returns `Ok(())` if valid, `Err` with every violation if not.
    fn validate(&self, input: &AssessmentInput) -> Result<(), InputValidationError>;
}

/// Errors reported by input validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputValidationError {
    #[error("{field}: {message}")]
    Field { field: String, message: String },

    #[error("{} validation errors: {}", .0.len(), join_messages(.0))]
    Multiple(Vec<InputValidationError>),
}

fn join_messages(errors: &[InputValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl InputValidationError {
    /// Creates a single-field violation.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        InputValidationError::Field {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Collapses a list of violations: one stays as is, several become `Multiple`.
    ///
    /// Returns `None` for an empty list.
    pub fn collect(mut errors: Vec<InputValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(InputValidationError::Multiple(errors)),
        }
    }

    /// Flattened `(field, message)` pairs in reporting order.
    pub fn violations(&self) -> Vec<(&str, &str)> {
        match self {
            InputValidationError::Field { field, message } => vec![(field, message)],
            InputValidationError::Multiple(errors) => {
                errors.iter().flat_map(|e| e.violations()).collect()
            }
        }
    }

    /// Get the count of violations.
    pub fn error_count(&self) -> usize {
        self.violations().len()
    }

    /// Returns true if any violation refers to the given field path.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations().iter().any(|(f, _)| *f == field)
    }
}

impl From<ValidationError> for InputValidationError {
    fn from(err: ValidationError) -> Self {
        InputValidationError::field(err.field().to_string(), err.to_string())
    }
}
