//! Brock / Pan-Can model (McWilliams 2013, full model with spiculation):
//! pre-test probability for screening-detected nodules.

use crate::domain::foundation::{ClinicalContext, Probability};
use crate::domain::nodule::{NoduleCharacteristics, NoduleType, PatientProfile, Sex};

use super::summary::{MissingFields, ModelId, PredictiveModelSummary};
use super::MAX_NODULE_DIAMETER_MM;

/// Published logistic-regression coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrockCoefficients {
    pub intercept: f64,
    /// Applied to (age - `age_center`).
    pub age_per_year: f64,
    pub age_center: f64,
    pub female: f64,
    pub family_history: f64,
    pub emphysema: f64,
    /// Applied to ((d / 10)^-0.5 - `size_center`).
    pub size: f64,
    pub size_center: f64,
    pub ground_glass: f64,
    pub part_solid: f64,
    pub upper_lobe: f64,
    /// Applied to (additional nodules - `count_center`).
    pub nodule_count: f64,
    pub count_center: f64,
    pub spiculation: f64,
}

pub const BROCK_COEFFICIENTS: BrockCoefficients = BrockCoefficients {
    intercept: -6.7892,
    age_per_year: 0.0287,
    age_center: 62.0,
    female: 0.6011,
    family_history: 0.2961,
    emphysema: 0.2953,
    size: -5.3854,
    size_center: 1.58113883,
    ground_glass: -0.1276,
    part_solid: 0.377,
    upper_lobe: 0.6581,
    nodule_count: -0.0824,
    count_center: 3.0,
    spiculation: 0.7729,
};

/// Fully resolved model inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrockInputs {
    pub age: f64,
    pub female: bool,
    pub family_history: bool,
    pub emphysema: bool,
    pub diameter_mm: f64,
    pub nodule_type: NoduleType,
    pub upper_lobe: bool,
    pub nodule_count: u32,
    pub spiculated: bool,
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Brock model functions.
pub struct BrockModel;

impl BrockModel {
    /// Computes the Brock summary for a screening-detected nodule.
    pub fn compute(
        patient: &PatientProfile,
        nodule: &NoduleCharacteristics,
    ) -> PredictiveModelSummary {
        if patient.clinical_context != ClinicalContext::Screening {
            return PredictiveModelSummary::not_applicable(
                ModelId::Brock,
                "Brock model applies to screening-detected nodules only",
            );
        }
        if nodule.diameter_mm > MAX_NODULE_DIAMETER_MM {
            return PredictiveModelSummary::not_applicable(
                ModelId::Brock,
                "Lesions >30 mm are masses; model not applicable",
            );
        }

        let mut missing = MissingFields::new();
        let age = missing.require(Some(patient.age).filter(|a| a.is_finite()), "age");
        let sex = missing.require(patient.sex, "sex");
        let family_history = missing.require(patient.has_family_history, "has_family_history");
        let emphysema = missing.require(patient.has_emphysema, "has_emphysema");
        let diameter = missing.require_positive(nodule.diameter_mm, "diameter_mm");
        let nodule_type = missing.require(
            Some(nodule.nodule_type).filter(|t| *t != NoduleType::Unsupported),
            "nodule_type",
        );
        let upper_lobe = missing.require(nodule.is_upper_lobe, "is_upper_lobe");
        let count = missing.require(Self::resolve_nodule_count(nodule), "nodule_count");
        let spiculated = missing.require(nodule.has_spiculation, "has_spiculation");

        let (
            Some(age),
            Some(sex),
            Some(family_history),
            Some(emphysema),
            Some(diameter_mm),
            Some(nodule_type),
            Some(upper_lobe),
            Some(nodule_count),
            Some(spiculated),
        ) = (
            age,
            sex,
            family_history,
            emphysema,
            diameter,
            nodule_type,
            upper_lobe,
            count,
            spiculated,
        )
        else {
            return PredictiveModelSummary::insufficient_data(ModelId::Brock, missing.into_vec());
        };

        let inputs = BrockInputs {
            age,
            female: sex == Sex::Female,
            family_history,
            emphysema,
            diameter_mm,
            nodule_type,
            upper_lobe,
            nodule_count,
            spiculated,
        };
        let mut summary = PredictiveModelSummary::available(
            ModelId::Brock,
            Probability::from_log_odds(Self::log_odds(&inputs)),
        );
        if nodule.nodule_count.is_none() {
            summary = summary.with_note("Nodule count not recorded; single nodule assumed");
        }
        summary
    }

    /// Explicit count wins; an unrecorded count means one nodule unless the
    /// nodule is flagged as one of several.
    pub fn resolve_nodule_count(nodule: &NoduleCharacteristics) -> Option<u32> {
        match (nodule.nodule_count, nodule.is_multiple) {
            (Some(count), _) => Some(count),
            (None, false) => Some(1),
            (None, true) => None,
        }
    }

    /// Linear predictor of the logistic model.
    pub fn log_odds(inputs: &BrockInputs) -> f64 {
        let c = &BROCK_COEFFICIENTS;
        let size_term = (inputs.diameter_mm / 10.0).powf(-0.5) - c.size_center;
        let additional_nodules = f64::from(inputs.nodule_count.saturating_sub(1));

        c.intercept
            + c.age_per_year * (inputs.age - c.age_center)
            + c.female * indicator(inputs.female)
            + c.family_history * indicator(inputs.family_history)
            + c.emphysema * indicator(inputs.emphysema)
            + c.size * size_term
            + c.ground_glass * indicator(inputs.nodule_type == NoduleType::GroundGlass)
            + c.part_solid * indicator(inputs.nodule_type == NoduleType::PartSolid)
            + c.upper_lobe * indicator(inputs.upper_lobe)
            + c.nodule_count * (additional_nodules - c.count_center)
            + c.spiculation * indicator(inputs.spiculated)
    }
}
