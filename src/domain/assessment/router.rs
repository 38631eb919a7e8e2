//! Routes an assessment input to the guideline for its clinical context.

use crate::domain::foundation::{ClinicalContext, GuidelineId};
use crate::domain::nodule::AssessmentInput;

use super::fleischner::FleischnerClassifier;
use super::lung_rads::LungRadsClassifier;
use super::result::AssessmentResult;

/// Guideline dispatch functions.
pub struct GuidelineRouter;

impl GuidelineRouter {
    /// Guideline that governs a clinical context.
    pub fn guideline_for(context: ClinicalContext) -> GuidelineId {
        match context {
            ClinicalContext::Incidental => GuidelineId::Fleischner2017,
            ClinicalContext::Screening => GuidelineId::LungRads2022,
        }
    }

    /// Runs exactly one classifier, chosen by the patient's context.
    ///
    /// A screening input without a scan extension is treated as baseline.
    pub fn classify(input: &AssessmentInput) -> AssessmentResult {
        match Self::guideline_for(input.patient.clinical_context) {
            GuidelineId::Fleischner2017 => FleischnerClassifier::classify(&input.patient, &input.nodule),
            GuidelineId::LungRads2022 => LungRadsClassifier::classify(
                &input.patient,
                &input.nodule,
                &input.screening.clone().unwrap_or_default(),
                &input.stepped_management.unwrap_or_default(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nodule::{NoduleCharacteristics, PatientProfile, RiskLevel};

    #[test]
    fn incidental_input_uses_fleischner() {
        let input = AssessmentInput::new(
            PatientProfile::incidental(60.0, RiskLevel::Low),
            NoduleCharacteristics::solid(7.0),
        );
        let result = GuidelineRouter::classify(&input);
        assert_eq!(result.guideline, GuidelineId::Fleischner2017);
    }

    #[test]
    fn screening_input_without_scan_defaults_to_baseline() {
        let input = AssessmentInput::new(
            PatientProfile::screening(60.0),
            NoduleCharacteristics::solid(20.0),
        );
        let result = GuidelineRouter::classify(&input);
        assert_eq!(result.guideline, GuidelineId::LungRads2022);
        assert_eq!(result.category, "4B");
        assert!(result.rationale.starts_with("Context: baseline"));
    }
}
