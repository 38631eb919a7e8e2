//! Lung-RADS v2022 categories and their management table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Lung-RADS assessment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LungRadsCategory {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4A")]
    FourA,
    #[serde(rename = "4B")]
    FourB,
    #[serde(rename = "4X")]
    FourX,
    /// Significant non-nodule finding.
    #[serde(rename = "S")]
    Significant,
}

/// Definition and management guidance for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGuidance {
    pub name: &'static str,
    pub description: &'static str,
    /// None where the category carries no malignancy estimate.
    pub malignancy_probability: Option<&'static str>,
    pub timing: &'static str,
    pub recommendation: &'static str,
    pub imaging_modality: &'static str,
}

static ZERO_GUIDANCE: CategoryGuidance = CategoryGuidance {
    name: "Incomplete",
    description: "Prior CT not available or incomplete exam",
    malignancy_probability: None,
    timing: "1-3 months",
    recommendation: "Additional imaging or LDCT",
    imaging_modality: "LDCT",
};

static ONE_GUIDANCE: CategoryGuidance = CategoryGuidance {
    name: "Negative",
    description: "No lung nodules or definitely benign nodules",
    malignancy_probability: Some("<1%"),
    timing: "12 months",
    recommendation: "Continue annual LDCT",
    imaging_modality: "LDCT",
};

static TWO_GUIDANCE: CategoryGuidance = CategoryGuidance {
    name: "Benign Appearance",
    description: "Nodules with a very low likelihood of becoming clinically active cancer",
    malignancy_probability: Some("<1%"),
    timing: "12 months",
    recommendation: "Continue annual LDCT",
    imaging_modality: "LDCT",
};

static THREE_GUIDANCE: CategoryGuidance = CategoryGuidance {
    name: "Probably Benign",
    description: "Probably benign findings; short-term follow-up suggested",
    malignancy_probability: Some("1-2%"),
    timing: "6 months",
    recommendation: "LDCT",
    imaging_modality: "LDCT",
};

static FOUR_A_GUIDANCE: CategoryGuidance = CategoryGuidance {
    name: "Suspicious",
    description: "Findings for which additional diagnostic testing is recommended",
    malignancy_probability: Some("5-15%"),
    timing: "3 months",
    recommendation: "LDCT; PET/CT if solid ≥8mm",
    imaging_modality: "LDCT or PET/CT",
};

static FOUR_B_GUIDANCE: CategoryGuidance = CategoryGuidance {
    name: "Very Suspicious",
    description: "Findings for which additional diagnostic testing or tissue sampling is recommended",
    malignancy_probability: Some(">15%"),
    timing: "As indicated",
    recommendation: "Diagnostic CT; PET/CT; biopsy",
    imaging_modality: "CT/PET/Biopsy",
};

static FOUR_X_GUIDANCE: CategoryGuidance = CategoryGuidance {
    name: "Very Suspicious with Additional Features",
    description: "Category 3 or 4 nodules with features that increase suspicion of malignancy",
    malignancy_probability: Some("Variable, higher concern"),
    timing: "As indicated",
    recommendation: "Diagnostic CT; PET/CT; biopsy; consider multidisciplinary review",
    imaging_modality: "CT/PET/Biopsy/MDT",
};

static SIGNIFICANT_GUIDANCE: CategoryGuidance = CategoryGuidance {
    name: "Significant Findings",
    description: "Clinically significant or potentially significant non-nodule findings",
    malignancy_probability: Some("Variable"),
    timing: "As indicated",
    recommendation: "Manage significant findings per clinical judgment",
    imaging_modality: "As indicated",
};

impl LungRadsCategory {
    /// All categories in reporting order.
    pub fn all() -> &'static [LungRadsCategory] {
        &[
            LungRadsCategory::Zero,
            LungRadsCategory::One,
            LungRadsCategory::Two,
            LungRadsCategory::Three,
            LungRadsCategory::FourA,
            LungRadsCategory::FourB,
            LungRadsCategory::FourX,
            LungRadsCategory::Significant,
        ]
    }

    /// Returns the category code as reported ("0", "4A", "S", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            LungRadsCategory::Zero => "0",
            LungRadsCategory::One => "1",
            LungRadsCategory::Two => "2",
            LungRadsCategory::Three => "3",
            LungRadsCategory::FourA => "4A",
            LungRadsCategory::FourB => "4B",
            LungRadsCategory::FourX => "4X",
            LungRadsCategory::Significant => "S",
        }
    }

    /// Returns the definition and management guidance.
    pub fn guidance(&self) -> &'static CategoryGuidance {
        match self {
            LungRadsCategory::Zero => &ZERO_GUIDANCE,
            LungRadsCategory::One => &ONE_GUIDANCE,
            LungRadsCategory::Two => &TWO_GUIDANCE,
            LungRadsCategory::Three => &THREE_GUIDANCE,
            LungRadsCategory::FourA => &FOUR_A_GUIDANCE,
            LungRadsCategory::FourB => &FOUR_B_GUIDANCE,
            LungRadsCategory::FourX => &FOUR_X_GUIDANCE,
            LungRadsCategory::Significant => &SIGNIFICANT_GUIDANCE,
        }
    }

    /// Categories that spiculation may escalate to 4X.
    pub fn is_escalatable(&self) -> bool {
        matches!(
            self,
            LungRadsCategory::Three | LungRadsCategory::FourA | LungRadsCategory::FourB
        )
    }
}

impl fmt::Display for LungRadsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LungRadsCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LungRadsCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::inconsistent("prior_category", format!("unknown category '{}'", s))
            })
    }
}
