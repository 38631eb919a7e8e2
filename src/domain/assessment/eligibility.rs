//! Eligibility Filters - gate guideline applicability before classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::nodule::PatientProfile;

/// Youngest age, in years, covered by the incidental-finding guideline.
pub const FLEISCHNER_MIN_AGE_YEARS: f64 = 35.0;

/// Why a guideline does not apply to a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    AgeBelowMinimum,
    KnownMalignancy,
    Immunocompromised,
    ScreeningContextRequired,
}

impl ExclusionReason {
    /// Caller-facing explanation, quoted verbatim in results.
    pub fn message(&self) -> &'static str {
        match self {
            ExclusionReason::AgeBelowMinimum => "Fleischner guidelines apply to patients ≥35 years",
            ExclusionReason::KnownMalignancy => "Known malignancy: use disease-specific guidance",
            ExclusionReason::Immunocompromised => "Immunocompromised: guideline not applicable",
            ExclusionReason::ScreeningContextRequired => "Screening context required for Lung-RADS",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Result of an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Applicable,
    NotApplicable(ExclusionReason),
}

impl Applicability {
    pub fn is_applicable(&self) -> bool {
        matches!(self, Applicability::Applicable)
    }

    /// Returns the exclusion reason, if any.
    pub fn reason(&self) -> Option<ExclusionReason> {
        match self {
            Applicability::Applicable => None,
            Applicability::NotApplicable(reason) => Some(*reason),
        }
    }
}

/// Eligibility checks for both guidelines.
pub struct EligibilityFilter;

impl EligibilityFilter {
    /// Checks the incidental-finding guideline.
    ///
    /// Exclusions are checked in priority order and the first one wins:
    /// age below 35, known malignancy, immunocompromise.
    pub fn fleischner(patient: &PatientProfile) -> Applicability {
        // Written so that a NaN age is excluded rather than admitted.
        if !(patient.age >= FLEISCHNER_MIN_AGE_YEARS) {
            return Applicability::NotApplicable(ExclusionReason::AgeBelowMinimum);
        }
        if patient.has_known_malignancy {
            return Applicability::NotApplicable(ExclusionReason::KnownMalignancy);
        }
        if patient.is_immunocompromised {
            return Applicability::NotApplicable(ExclusionReason::Immunocompromised);
        }
        Applicability::Applicable
    }

    /// Checks the screening guideline: the context must be screening.
    pub fn lung_rads(patient: &PatientProfile) -> Applicability {
        if patient.clinical_context.is_screening() {
            Applicability::Applicable
        } else {
            Applicability::NotApplicable(ExclusionReason::ScreeningContextRequired)
        }
    }
}
