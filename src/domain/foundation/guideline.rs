//! Guideline identifiers and published-version metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The guideline that produced an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuidelineId {
    #[serde(rename = "fleischner-2017")]
    Fleischner2017,
    #[serde(rename = "lung-rads-2022")]
    LungRads2022,
}

impl GuidelineId {
    /// Returns the stable wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            GuidelineId::Fleischner2017 => "fleischner-2017",
            GuidelineId::LungRads2022 => "lung-rads-2022",
        }
    }

    /// Returns the publication metadata for this guideline.
    pub fn version(&self) -> GuidelineVersion {
        match self {
            GuidelineId::Fleischner2017 => GuidelineVersion {
                id: *self,
                label: "Fleischner Society 2017",
                version: "2017",
                citation: "MacMahon H, et al. Radiology 2017;284(1):228-243",
                reference: "doi:10.1148/radiol.2017161659",
            },
            GuidelineId::LungRads2022 => GuidelineVersion {
                id: *self,
                label: "Lung-RADS v2022",
                version: "2022",
                citation: "American College of Radiology. Lung-RADS v2022",
                reference: "https://www.acr.org/Clinical-Resources/Reporting-and-Data-Systems/Lung-Rads",
            },
        }
    }
}

impl fmt::Display for GuidelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Published version and citation of a guideline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuidelineVersion {
    pub id: GuidelineId,
    pub label: &'static str,
    pub version: &'static str,
    pub citation: &'static str,
    /// DOI or URL of the source document.
    pub reference: &'static str,
}
