//! Nodule characteristics: density type, size and morphology flags.
//!
//! All morphology flags live on one flat record. Boolean flags that only
//! steer classification default to false; flags that the risk models must
//! see explicitly (`has_spiculation`, `is_upper_lobe`) are optional so that
//! "not recorded" stays distinguishable from "absent".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nodule density sub-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoduleType {
    Solid,
    GroundGlass,
    PartSolid,
    /// Any type string not recognised on input.
    #[serde(other)]
    Unsupported,
}

impl NoduleType {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            NoduleType::Solid => "Solid",
            NoduleType::GroundGlass => "Ground-glass",
            NoduleType::PartSolid => "Part-solid",
            NoduleType::Unsupported => "Unsupported",
        }
    }

    /// Ground-glass and part-solid nodules are subsolid.
    pub fn is_subsolid(&self) -> bool {
        matches!(self, NoduleType::GroundGlass | NoduleType::PartSolid)
    }
}

impl fmt::Display for NoduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoduleType::Solid => "solid",
            NoduleType::GroundGlass => "ground-glass",
            NoduleType::PartSolid => "part-solid",
            NoduleType::Unsupported => "unsupported",
        };
        write!(f, "{}", s)
    }
}

/// Location of an airway (endobronchial) nodule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AirwayLocation {
    Subsegmental,
    SegmentalProximal,
}

/// Lung-RADS category assigned to an atypical pulmonary cyst by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtypicalCystCategory {
    #[serde(rename = "category3")]
    Category3,
    #[serde(rename = "category4A")]
    Category4A,
    #[serde(rename = "category4B")]
    Category4B,
}

/// Reader's call on an inflammatory/infectious finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InflammatoryCategory {
    #[serde(rename = "category0")]
    Category0,
    #[serde(rename = "category2")]
    Category2,
}

/// FDG uptake on PET-CT, banded as in the Herder model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetUptake {
    #[serde(rename = "none", alias = "absent")]
    Absent,
    Faint,
    Moderate,
    Intense,
}

impl PetUptake {
    /// Likelihood ratio of malignancy for this uptake band.
    pub fn likelihood_ratio(&self) -> f64 {
        match self {
            PetUptake::Absent => 0.08,
            PetUptake::Faint => 0.17,
            PetUptake::Moderate => 1.9,
            PetUptake::Intense => 9.9,
        }
    }
}

/// Measured nodule attributes.
///
/// For multiple nodules the diameter describes the dominant (most
/// suspicious) nodule; the engine never aggregates nodule records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoduleCharacteristics {
    #[serde(rename = "type")]
    pub nodule_type: NoduleType,

    /// Mean diameter in millimeters.
    pub diameter_mm: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solid_component_mm: Option<f64>,

    #[serde(default)]
    pub is_multiple: bool,

    #[serde(default)]
    pub is_perifissural: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_spiculation: Option<bool>,

    #[serde(default)]
    pub is_juxtapleural: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_upper_lobe: Option<bool>,

    #[serde(default)]
    pub is_airway: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airway_location: Option<AirwayLocation>,

    /// Airway nodule persisted on a control scan.
    #[serde(default)]
    pub airway_persistent: bool,

    #[serde(default)]
    pub is_atypical_cyst: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atypical_cyst_category: Option<AtypicalCystCategory>,

    /// Definitively benign, or no nodules at all.
    #[serde(default)]
    pub is_benign: bool,

    #[serde(default)]
    pub has_significant_finding: bool,

    #[serde(default)]
    pub is_inflammatory: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflammatory_category: Option<InflammatoryCategory>,

    /// New since the prior screening exam.
    #[serde(default)]
    pub is_new: bool,

    #[serde(default)]
    pub has_pet: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_uptake: Option<PetUptake>,

    /// Total nodule count, used by the Brock model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodule_count: Option<u32>,
}

impl NoduleCharacteristics {
    /// Creates a single nodule with no morphology flags set.
    pub fn new(nodule_type: NoduleType, diameter_mm: f64) -> Self {
        Self {
            nodule_type,
            diameter_mm,
            solid_component_mm: None,
            is_multiple: false,
            is_perifissural: false,
            has_spiculation: None,
            is_juxtapleural: false,
            is_upper_lobe: None,
            is_airway: false,
            airway_location: None,
            airway_persistent: false,
            is_atypical_cyst: false,
            atypical_cyst_category: None,
            is_benign: false,
            has_significant_finding: false,
            is_inflammatory: false,
            inflammatory_category: None,
            is_new: false,
            has_pet: false,
            pet_uptake: None,
            nodule_count: None,
        }
    }

    pub fn solid(diameter_mm: f64) -> Self {
        Self::new(NoduleType::Solid, diameter_mm)
    }

    pub fn ground_glass(diameter_mm: f64) -> Self {
        Self::new(NoduleType::GroundGlass, diameter_mm)
    }

    pub fn part_solid(diameter_mm: f64, solid_component_mm: Option<f64>) -> Self {
        Self {
            solid_component_mm,
            ..Self::new(NoduleType::PartSolid, diameter_mm)
        }
    }

    /// Marks the nodule as one of several.
    pub fn multiple(mut self) -> Self {
        self.is_multiple = true;
        self
    }

    /// Records the spiculation flag explicitly.
    pub fn with_spiculation(mut self, spiculated: bool) -> Self {
        self.has_spiculation = Some(spiculated);
        self
    }

    /// True only when spiculation was recorded as present.
    pub fn is_spiculated(&self) -> bool {
        self.has_spiculation.unwrap_or(false)
    }

    /// True when a measured solid component is larger than the whole nodule.
    pub fn solid_component_exceeds_diameter(&self) -> bool {
        self.solid_component_mm
            .map(|solid| solid > self.diameter_mm)
            .unwrap_or(false)
    }
}
