//! Screening-only inputs: scan context and stepped-management history.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::assessment::LungRadsCategory;

/// First screening exam vs. a subsequent comparison exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanType {
    Baseline,
    FollowUp,
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScanType::Baseline => "baseline",
            ScanType::FollowUp => "follow-up",
        };
        write!(f, "{}", s)
    }
}

/// Scan context for a screening assessment.
///
/// Follow-up scans are expected to carry both prior fields; the input
/// validator enforces that, the classifier tolerates their absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningExtension {
    pub scan_type: ScanType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_diameter_mm: Option<f64>,

    /// Months between the prior scan and this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_scan_months_ago: Option<f64>,
}

impl ScreeningExtension {
    pub fn baseline() -> Self {
        Self {
            scan_type: ScanType::Baseline,
            prior_diameter_mm: None,
            prior_scan_months_ago: None,
        }
    }

    /// A follow-up scan with no prior measurement recorded.
    pub fn follow_up() -> Self {
        Self {
            scan_type: ScanType::FollowUp,
            prior_diameter_mm: None,
            prior_scan_months_ago: None,
        }
    }

    /// A follow-up scan compared against a prior measurement.
    pub fn follow_up_with_prior(prior_diameter_mm: f64, months_ago: f64) -> Self {
        Self {
            scan_type: ScanType::FollowUp,
            prior_diameter_mm: Some(prior_diameter_mm),
            prior_scan_months_ago: Some(months_ago),
        }
    }
}

impl Default for ScreeningExtension {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Outcome of the prior screening interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorStatus {
    Stable,
    Progression,
}

/// Prior category and status used for stepped management.
///
/// Both-or-neither is enforced by input validation; the classifier only acts
/// when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SteppedManagementState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_category: Option<LungRadsCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_status: Option<PriorStatus>,
}

impl SteppedManagementState {
    pub fn new(prior_category: LungRadsCategory, prior_status: PriorStatus) -> Self {
        Self {
            prior_category: Some(prior_category),
            prior_status: Some(prior_status),
        }
    }

    /// Returns the pair only when both halves are present.
    pub fn complete(&self) -> Option<(LungRadsCategory, PriorStatus)> {
        match (self.prior_category, self.prior_status) {
            (Some(category), Some(status)) => Some((category, status)),
            _ => None,
        }
    }

    /// True when exactly one of the two fields is set.
    pub fn is_partial(&self) -> bool {
        self.prior_category.is_some() != self.prior_status.is_some()
    }
}
