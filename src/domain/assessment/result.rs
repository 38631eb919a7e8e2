//! AssessmentResult - the structured output of both guideline classifiers.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::GuidelineId;

/// Category label used whenever a guideline does not apply.
pub const NOT_APPLICABLE_CATEGORY: &str = "Not applicable";

/// Category label used for a nodule type neither guideline recognises.
pub const UNSUPPORTED_CATEGORY: &str = "Unsupported nodule type";

pub const WARNING_SOLID_COMPONENT_REQUIRED: &str =
    "Solid component size required for part-solid assessment";

pub const WARNING_SOLID_EXCEEDS_DIAMETER: &str = "Solid component cannot exceed total diameter";

pub const WARNING_HIGHLY_SUSPICIOUS: &str = "HIGHLY SUSPICIOUS: consider tissue diagnosis";

pub const WARNING_UNKNOWN_NODULE_TYPE: &str = "Unknown nodule type";

/// Outcome of one guideline classification.
///
/// Built fresh per call and owned by the caller. The rationale names every
/// factor that decided the category; report layers quote it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub guideline: GuidelineId,
    pub category: String,
    pub recommendation: String,
    pub follow_up_interval: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imaging_modality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub malignancy_risk: Option<String>,

    pub rationale: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AssessmentResult {
    /// Creates a result with no modality, risk annotation or warnings.
    pub fn new(
        guideline: GuidelineId,
        category: impl Into<String>,
        recommendation: impl Into<String>,
        follow_up_interval: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            guideline,
            category: category.into(),
            recommendation: recommendation.into(),
            follow_up_interval: follow_up_interval.into(),
            imaging_modality: None,
            malignancy_risk: None,
            rationale: rationale.into(),
            warnings: Vec::new(),
        }
    }

    /// Sets the imaging modality.
    pub fn with_imaging_modality(mut self, modality: impl Into<String>) -> Self {
        self.imaging_modality = Some(modality.into());
        self
    }

    /// Sets the malignancy-risk annotation.
    pub fn with_malignancy_risk(mut self, risk: impl Into<String>) -> Self {
        self.malignancy_risk = Some(risk.into());
        self
    }

    /// Appends a warning.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Appends a warning in place.
    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Checks whether an exact warning string is present.
    pub fn has_warning(&self, warning: &str) -> bool {
        self.warnings.iter().any(|w| w == warning)
    }

    /// True when the guideline declined to classify the patient.
    pub fn is_not_applicable(&self) -> bool {
        self.category == NOT_APPLICABLE_CATEGORY
    }
}
