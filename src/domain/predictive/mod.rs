//! Predictive module - Malignancy-risk models.
//!
//! # Components
//!
//! - `MayoModel` - Pre-test probability, incidental context
//! - `BrockModel` - Pre-test probability, screening context
//! - `HerderModel` - Post-test probability after PET-CT, chained on one of the above
//! - `RiskModelCalculator` - Computes all three summaries for one patient/nodule
//!
//! # Design
//!
//! Every model is total: unmet preconditions become `NotApplicable` or
//! `InsufficientData` summaries, never an error and never a default
//! probability. Herder receives its pre-test summary as an argument instead
//! of recomputing it.

mod brock;
mod herder;
mod mayo;
mod summary;

pub use brock::{BrockCoefficients, BrockInputs, BrockModel, BROCK_COEFFICIENTS};
pub use herder::{HerderModel, HERDER_MIN_DIAMETER_MM, HERDER_MIN_PRE_TEST_PROBABILITY};
pub use mayo::{MayoCoefficients, MayoInputs, MayoModel, MAYO_COEFFICIENTS};
pub use summary::{ModelId, PredictiveModelSummary, PredictiveStatus};

use crate::domain::foundation::ClinicalContext;
use crate::domain::nodule::{NoduleCharacteristics, PatientProfile};

/// Lesions above this diameter are masses; no model applies.
pub const MAX_NODULE_DIAMETER_MM: f64 = 30.0;

/// Risk-model orchestration functions.
pub struct RiskModelCalculator;

impl RiskModelCalculator {
    /// Computes the Mayo, Brock and Herder summaries, in that order.
    ///
    /// Herder's pre-test probability comes from the model recommended for
    /// the patient's clinical context.
    pub fn compute_summaries(
        patient: &PatientProfile,
        nodule: &NoduleCharacteristics,
    ) -> [PredictiveModelSummary; 3] {
        let mayo = MayoModel::compute(patient, nodule);
        let brock = BrockModel::compute(patient, nodule);

        let pre_test = match Self::recommended_model(patient.clinical_context) {
            ModelId::Brock => &brock,
            _ => &mayo,
        };
        let herder = HerderModel::compute(nodule, pre_test);

        [mayo, brock, herder]
    }

    /// Brock for screening, Mayo for incidental findings.
    pub fn recommended_model(context: ClinicalContext) -> ModelId {
        match context {
            ClinicalContext::Screening => ModelId::Brock,
            ClinicalContext::Incidental => ModelId::Mayo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nodule::{
        ExtrathoracicCancerHistory, PetUptake, RiskLevel, Sex, SmokingStatus,
    };

    #[test]
    fn recommended_model_by_context() {
        assert_eq!(
            RiskModelCalculator::recommended_model(ClinicalContext::Screening),
            ModelId::Brock
        );
        assert_eq!(
            RiskModelCalculator::recommended_model(ClinicalContext::Incidental),
            ModelId::Mayo
        );
    }

    #[test]
    fn summaries_are_ordered_mayo_brock_herder() {
        let patient = PatientProfile::incidental(60.0, RiskLevel::Low);
        let nodule = NoduleCharacteristics::solid(10.0);
        let ids: Vec<ModelId> = RiskModelCalculator::compute_summaries(&patient, &nodule)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![ModelId::Mayo, ModelId::Brock, ModelId::Herder]);
    }

    #[test]
    fn incidental_herder_chains_on_mayo() {
        let mut patient = PatientProfile::incidental(60.0, RiskLevel::High);
        patient.smoking_status = Some(SmokingStatus::Current);
        patient.extrathoracic_cancer_history = Some(ExtrathoracicCancerHistory::NoHistory);
        let mut nodule = NoduleCharacteristics::solid(10.0).with_spiculation(false);
        nodule.is_upper_lobe = Some(true);
        nodule.has_pet = true;
        nodule.pet_uptake = Some(PetUptake::Moderate);

        let [mayo, brock, herder] = RiskModelCalculator::compute_summaries(&patient, &nodule);
        assert!(mayo.is_available());
        assert_eq!(brock.status, PredictiveStatus::NotApplicable);
        assert_eq!(herder.pre_test_model_id, Some(ModelId::Mayo));
        assert_eq!(herder.pre_test_probability, mayo.probability);
        assert!(herder.is_available());
    }

    #[test]
    fn screening_herder_chains_on_brock() {
        let mut patient = PatientProfile::screening(62.0);
        patient.sex = Some(Sex::Male);
        patient.has_family_history = Some(false);
        patient.has_emphysema = Some(false);
        let mut nodule = NoduleCharacteristics::solid(10.0).with_spiculation(false);
        nodule.is_upper_lobe = Some(false);
        nodule.has_pet = true;
        nodule.pet_uptake = Some(PetUptake::Intense);

        let [mayo, brock, herder] = RiskModelCalculator::compute_summaries(&patient, &nodule);
        assert_eq!(mayo.status, PredictiveStatus::NotApplicable);
        assert!(brock.is_available());
        // Brock gives ~3%, under the 10% validity threshold.
        assert_eq!(herder.status, PredictiveStatus::NotApplicable);
        assert_eq!(herder.pre_test_model_id, Some(ModelId::Brock));
        assert!(herder.pre_test_probability.is_some());
    }
}
