//! AssessmentInput - everything one classification call needs.

use serde::{Deserialize, Serialize};

use super::{NoduleCharacteristics, PatientProfile, ScreeningExtension, SteppedManagementState};

/// Complete input for one assessment.
///
/// The screening fields are ignored in the incidental context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub patient: PatientProfile,
    pub nodule: NoduleCharacteristics,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screening: Option<ScreeningExtension>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stepped_management: Option<SteppedManagementState>,
}

impl AssessmentInput {
    pub fn new(patient: PatientProfile, nodule: NoduleCharacteristics) -> Self {
        Self {
            patient,
            nodule,
            screening: None,
            stepped_management: None,
        }
    }

    /// Attaches the scan context.
    pub fn with_screening(mut self, screening: ScreeningExtension) -> Self {
        self.screening = Some(screening);
        self
    }

    /// Attaches the prior category and status.
    pub fn with_stepped_management(mut self, state: SteppedManagementState) -> Self {
        self.stepped_management = Some(state);
        self
    }
}
