//! Herder model: post-test probability after PET-CT.
//!
//! Takes an already computed pre-test summary (Mayo or Brock) and scales its
//! odds by the likelihood ratio of the observed FDG uptake band.

use crate::domain::foundation::Probability;
use crate::domain::nodule::NoduleCharacteristics;

use super::summary::{MissingFields, ModelId, PredictiveModelSummary, PredictiveStatus};
use super::MAX_NODULE_DIAMETER_MM;

/// PET-CT is only informative for nodules at least this size.
pub const HERDER_MIN_DIAMETER_MM: f64 = 8.0;

/// Below this pre-test probability the model is not validated.
pub const HERDER_MIN_PRE_TEST_PROBABILITY: f64 = 0.10;

/// Herder model functions.
pub struct HerderModel;

impl HerderModel {
    /// Computes the post-test summary from `pre_test`.
    ///
    /// # Preconditions (checked in order)
    /// 1. PET available and diameter >= 8 mm
    /// 2. diameter <= 30 mm
    /// 3. pre-test model applicable and complete
    /// 4. pre-test probability >= 10%
    /// 5. PET uptake band recorded
    pub fn compute(
        nodule: &NoduleCharacteristics,
        pre_test: &PredictiveModelSummary,
    ) -> PredictiveModelSummary {
        if !nodule.has_pet || !(nodule.diameter_mm >= HERDER_MIN_DIAMETER_MM) {
            return PredictiveModelSummary::not_applicable(
                ModelId::Herder,
                "Requires PET-CT and a nodule ≥8 mm",
            );
        }
        if nodule.diameter_mm > MAX_NODULE_DIAMETER_MM {
            return PredictiveModelSummary::not_applicable(
                ModelId::Herder,
                "Lesions >30 mm are masses; model not applicable",
            );
        }

        let pre_test_probability = match (pre_test.status, pre_test.probability) {
            (PredictiveStatus::Available, Some(probability)) => probability,
            (PredictiveStatus::NotApplicable, _) => {
                let reason = format!(
                    "Pre-test model {} not applicable: {}",
                    pre_test.label,
                    pre_test.reason.as_deref().unwrap_or("no reason given")
                );
                return PredictiveModelSummary::not_applicable(ModelId::Herder, reason)
                    .with_pre_test(pre_test.id, None);
            }
            _ => {
                let mut missing = MissingFields::new();
                missing.require::<Probability>(None, "pre_test_probability");
                missing.require(nodule.pet_uptake, "pet_uptake");
                return PredictiveModelSummary::insufficient_data(
                    ModelId::Herder,
                    missing.into_vec(),
                )
                .with_pre_test(pre_test.id, None)
                .with_note(format!("Complete the {} inputs first", pre_test.label));
            }
        };

        if pre_test_probability.value() < HERDER_MIN_PRE_TEST_PROBABILITY {
            return PredictiveModelSummary::not_applicable(
                ModelId::Herder,
                format!(
                    "Pre-test probability {} is below the 10% validity threshold",
                    pre_test_probability
                ),
            )
            .with_pre_test(pre_test.id, Some(pre_test_probability));
        }

        let mut missing = MissingFields::new();
        let Some(uptake) = missing.require(nodule.pet_uptake, "pet_uptake") else {
            return PredictiveModelSummary::insufficient_data(ModelId::Herder, missing.into_vec())
                .with_pre_test(pre_test.id, Some(pre_test_probability));
        };

        let post_test = Self::post_test_probability(pre_test_probability, uptake.likelihood_ratio());
        PredictiveModelSummary::available(ModelId::Herder, post_test)
            .with_pre_test(pre_test.id, Some(pre_test_probability))
            .with_note(format!("Pre-test probability from {}", pre_test.label))
    }

    /// Bayes update on the odds scale.
    pub fn post_test_probability(pre_test: Probability, likelihood_ratio: f64) -> Probability {
        Probability::from_odds(pre_test.odds() * likelihood_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RiskBand;
    use crate::domain::nodule::PetUptake;

    fn pet_nodule(diameter_mm: f64, uptake: Option<PetUptake>) -> NoduleCharacteristics {
        let mut nodule = NoduleCharacteristics::solid(diameter_mm);
        nodule.has_pet = true;
        nodule.pet_uptake = uptake;
        nodule
    }

    fn mayo(probability: f64) -> PredictiveModelSummary {
        PredictiveModelSummary::available(ModelId::Mayo, Probability::try_new(probability).unwrap())
    }

    #[test]
    fn moderate_uptake_raises_intermediate_probability() {
        let summary = HerderModel::compute(&pet_nodule(10.0, Some(PetUptake::Moderate)), &mayo(0.1636));
        assert!(summary.is_available());
        let p = summary.probability.unwrap().value();
        assert!((p - 0.2710).abs() < 1e-3);
        assert_eq!(summary.risk_band, Some(RiskBand::Intermediate));
        assert_eq!(summary.pre_test_model_id, Some(ModelId::Mayo));
    }

    #[test]
    fn intense_uptake_on_high_pre_test_is_high() {
        let summary = HerderModel::compute(&pet_nodule(16.0, Some(PetUptake::Intense)), &mayo(0.9041));
        let p = summary.probability.unwrap().value();
        assert!((p - 0.9894).abs() < 1e-3);
        assert_eq!(summary.risk_band, Some(RiskBand::High));
    }

    #[test]
    fn absent_uptake_lowers_probability() {
        let summary = HerderModel::compute(&pet_nodule(12.0, Some(PetUptake::Absent)), &mayo(0.5));
        let p = summary.probability.unwrap().value();
        assert!((p - 0.08 / 1.08).abs() < 1e-9);
    }

    #[test]
    fn no_pet_not_applicable() {
        let mut nodule = pet_nodule(12.0, Some(PetUptake::Intense));
        nodule.has_pet = false;
        let summary = HerderModel::compute(&nodule, &mayo(0.5));
        assert_eq!(summary.status, PredictiveStatus::NotApplicable);
        assert!(summary.reason.unwrap().contains("PET-CT"));
    }

    #[test]
    fn small_nodule_not_applicable_even_with_pet() {
        let summary = HerderModel::compute(&pet_nodule(7.9, Some(PetUptake::Intense)), &mayo(0.5));
        assert_eq!(summary.status, PredictiveStatus::NotApplicable);
    }

    #[test]
    fn mass_not_applicable() {
        let summary = HerderModel::compute(&pet_nodule(31.0, Some(PetUptake::Intense)), &mayo(0.5));
        assert_eq!(summary.status, PredictiveStatus::NotApplicable);
    }

    #[test]
    fn inapplicable_pre_test_propagates() {
        let pre_test = PredictiveModelSummary::not_applicable(ModelId::Mayo, "Not validated");
        let summary = HerderModel::compute(&pet_nodule(12.0, Some(PetUptake::Faint)), &pre_test);
        assert_eq!(summary.status, PredictiveStatus::NotApplicable);
        assert_eq!(summary.pre_test_model_id, Some(ModelId::Mayo));
        assert!(summary.reason.unwrap().contains("Mayo Clinic"));
    }

    #[test]
    fn insufficient_pre_test_lists_missing_inputs() {
        let pre_test =
            PredictiveModelSummary::insufficient_data(ModelId::Brock, vec!["sex".to_string()]);
        let summary = HerderModel::compute(&pet_nodule(12.0, None), &pre_test);
        assert_eq!(summary.status, PredictiveStatus::InsufficientData);
        assert_eq!(summary.missing_fields, vec!["pre_test_probability", "pet_uptake"]);
    }

    #[test]
    fn low_pre_test_probability_not_applicable_and_surfaced() {
        let summary = HerderModel::compute(&pet_nodule(12.0, Some(PetUptake::Intense)), &mayo(0.08));
        assert_eq!(summary.status, PredictiveStatus::NotApplicable);
        assert!(summary.reason.unwrap().contains("10%"));
        assert_eq!(summary.pre_test_probability.map(|p| p.value()), Some(0.08));
    }

    #[test]
    fn missing_uptake_is_insufficient() {
        let summary = HerderModel::compute(&pet_nodule(12.0, None), &mayo(0.3));
        assert_eq!(summary.status, PredictiveStatus::InsufficientData);
        assert_eq!(summary.missing_fields, vec!["pet_uptake"]);
        assert!(summary.pre_test_probability.is_some());
    }
}
