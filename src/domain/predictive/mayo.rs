//! Mayo Clinic model (Swensen 1997): pre-test probability for incidental nodules.

use crate::domain::foundation::{ClinicalContext, Probability};
use crate::domain::nodule::{ExtrathoracicCancerHistory, NoduleCharacteristics, PatientProfile};

use super::summary::{MissingFields, ModelId, PredictiveModelSummary};
use super::MAX_NODULE_DIAMETER_MM;

/// Published logistic-regression coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MayoCoefficients {
    pub intercept: f64,
    pub age_per_year: f64,
    pub ever_smoker: f64,
    pub cancer_over_5_years: f64,
    pub diameter_per_mm: f64,
    pub spiculation: f64,
    pub upper_lobe: f64,
}

pub const MAYO_COEFFICIENTS: MayoCoefficients = MayoCoefficients {
    intercept: -6.8272,
    age_per_year: 0.0391,
    ever_smoker: 0.7917,
    cancer_over_5_years: 1.3388,
    diameter_per_mm: 0.1274,
    spiculation: 1.0407,
    upper_lobe: 0.7838,
};

/// Fully resolved model inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MayoInputs {
    pub age: f64,
    pub ever_smoker: bool,
    pub cancer_over_5_years: bool,
    pub diameter_mm: f64,
    pub spiculated: bool,
    pub upper_lobe: bool,
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Mayo model functions.
pub struct MayoModel;

impl MayoModel {
    /// Computes the Mayo summary for an incidental nodule.
    ///
    /// Not applicable outside the incidental context, for masses over 30 mm,
    /// with known malignancy, or with extrathoracic cancer in the last 5 years.
    pub fn compute(
        patient: &PatientProfile,
        nodule: &NoduleCharacteristics,
    ) -> PredictiveModelSummary {
        if patient.clinical_context != ClinicalContext::Incidental {
            return PredictiveModelSummary::not_applicable(
                ModelId::Mayo,
                "Mayo model applies to incidental nodules only",
            );
        }
        if nodule.diameter_mm > MAX_NODULE_DIAMETER_MM {
            return PredictiveModelSummary::not_applicable(
                ModelId::Mayo,
                "Lesions >30 mm are masses; model not applicable",
            );
        }
        if patient.has_known_malignancy {
            return PredictiveModelSummary::not_applicable(
                ModelId::Mayo,
                "Not validated in patients with known malignancy",
            );
        }
        if patient.extrathoracic_cancer_history == Some(ExtrathoracicCancerHistory::Recent) {
            return PredictiveModelSummary::not_applicable(
                ModelId::Mayo,
                "Not validated with extrathoracic cancer diagnosed within 5 years",
            );
        }

        let mut missing = MissingFields::new();
        let age = missing.require(Some(patient.age).filter(|a| a.is_finite()), "age");
        let smoking = missing.require(patient.smoking_status, "smoking_status");
        let cancer = missing.require(
            patient.extrathoracic_cancer_history,
            "extrathoracic_cancer_history",
        );
        let diameter = missing.require_positive(nodule.diameter_mm, "diameter_mm");
        let upper_lobe = missing.require(nodule.is_upper_lobe, "is_upper_lobe");
        let spiculated = missing.require(nodule.has_spiculation, "has_spiculation");

        let (Some(age), Some(smoking), Some(cancer), Some(diameter_mm), Some(upper_lobe), Some(spiculated)) =
            (age, smoking, cancer, diameter, upper_lobe, spiculated)
        else {
            return PredictiveModelSummary::insufficient_data(ModelId::Mayo, missing.into_vec());
        };

        let inputs = MayoInputs {
            age,
            ever_smoker: smoking.is_ever_smoker(),
            cancer_over_5_years: cancer == ExtrathoracicCancerHistory::Over5Years,
            diameter_mm,
            spiculated,
            upper_lobe,
        };
        PredictiveModelSummary::available(
            ModelId::Mayo,
            Probability::from_log_odds(Self::log_odds(&inputs)),
        )
    }

    /// Linear predictor of the logistic model.
    pub fn log_odds(inputs: &MayoInputs) -> f64 {
        let c = &MAYO_COEFFICIENTS;
        c.intercept
            + c.age_per_year * inputs.age
            + c.ever_smoker * indicator(inputs.ever_smoker)
            + c.cancer_over_5_years * indicator(inputs.cancer_over_5_years)
            + c.diameter_per_mm * inputs.diameter_mm
            + c.spiculation * indicator(inputs.spiculated)
            + c.upper_lobe * indicator(inputs.upper_lobe)
    }
}
