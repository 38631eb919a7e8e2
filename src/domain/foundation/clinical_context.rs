//! ClinicalContext enum selecting which guideline governs a nodule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the nodule came to attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicalContext {
    /// Found on a CT performed for another reason.
    Incidental,
    /// Found in a lung cancer screening program.
    Screening,
}

impl ClinicalContext {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ClinicalContext::Incidental => "Incidental Finding (Fleischner)",
            ClinicalContext::Screening => "Lung Cancer Screening (Lung-RADS)",
        }
    }

    /// Returns true for the screening context.
    pub fn is_screening(&self) -> bool {
        matches!(self, ClinicalContext::Screening)
    }
}

impl fmt::Display for ClinicalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClinicalContext::Incidental => "incidental",
            ClinicalContext::Screening => "screening",
        };
        write!(f, "{}", s)
    }
}
