//! PredictiveModelSummary - the typed outcome of one risk model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Probability, RiskBand};

/// The three malignancy-risk models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelId {
    /// Pre-test model for incidental nodules (Swensen 1997).
    Mayo,
    /// Pre-test model for screening-detected nodules (McWilliams 2013).
    Brock,
    /// Post-test model combining a pre-test probability with PET uptake.
    Herder,
}

impl ModelId {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ModelId::Mayo => "Mayo Clinic",
            ModelId::Brock => "Brock (Pan-Can)",
            ModelId::Herder => "Herder (post-PET)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Mayo => "mayo",
            ModelId::Brock => "brock",
            ModelId::Herder => "herder",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a model produced a probability, and if not, why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictiveStatus {
    Available,
    InsufficientData,
    NotApplicable,
}

/// Outcome of one risk model.
///
/// Exactly one of these holds:
/// - `Available`: `probability` and `risk_band` are set
/// - `InsufficientData`: `missing_fields` is non-empty
/// - `NotApplicable`: `reason` is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictiveModelSummary {
    pub id: ModelId,
    pub label: String,
    pub status: PredictiveStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<Probability>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_band: Option<RiskBand>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,

    /// Model that supplied the pre-test probability (post-test models only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_test_model_id: Option<ModelId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_test_probability: Option<Probability>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl PredictiveModelSummary {
    fn empty(id: ModelId, status: PredictiveStatus) -> Self {
        Self {
            id,
            label: id.label().to_string(),
            status,
            probability: None,
            risk_band: None,
            reason: None,
            missing_fields: Vec::new(),
            pre_test_model_id: None,
            pre_test_probability: None,
            notes: Vec::new(),
        }
    }

    /// A computed probability; the risk band is derived from it.
    pub fn available(id: ModelId, probability: Probability) -> Self {
        Self {
            probability: Some(probability),
            risk_band: Some(probability.risk_band()),
            ..Self::empty(id, PredictiveStatus::Available)
        }
    }

    pub fn insufficient_data(id: ModelId, missing_fields: Vec<String>) -> Self {
        Self {
            missing_fields,
            ..Self::empty(id, PredictiveStatus::InsufficientData)
        }
    }

    pub fn not_applicable(id: ModelId, reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::empty(id, PredictiveStatus::NotApplicable)
        }
    }

    /// Records which model supplied the pre-test probability.
    pub fn with_pre_test(mut self, model: ModelId, probability: Option<Probability>) -> Self {
        self.pre_test_model_id = Some(model);
        self.pre_test_probability = probability;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == PredictiveStatus::Available
    }
}

/// Collects the names of required inputs that were not supplied.
#[derive(Debug, Default)]
pub(crate) struct MissingFields(Vec<String>);

impl MissingFields {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Passes `value` through, recording `field` when it is absent.
    pub(crate) fn require<T>(&mut self, value: Option<T>, field: &str) -> Option<T> {
        if value.is_none() {
            self.0.push(field.to_string());
        }
        value
    }

    /// Like `require`, for numeric inputs that must be finite and positive.
    pub(crate) fn require_positive(&mut self, value: f64, field: &str) -> Option<f64> {
        self.require(Some(value).filter(|v| v.is_finite() && *v > 0.0), field)
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_derives_risk_band() {
        let p = Probability::try_new(0.7).unwrap();
        let summary = PredictiveModelSummary::available(ModelId::Mayo, p);
        assert!(summary.is_available());
        assert_eq!(summary.risk_band, Some(RiskBand::High));
        assert_eq!(summary.label, "Mayo Clinic");
    }

    #[test]
    fn insufficient_data_lists_fields() {
        let summary =
            PredictiveModelSummary::insufficient_data(ModelId::Brock, vec!["sex".to_string()]);
        assert_eq!(summary.status, PredictiveStatus::InsufficientData);
        assert!(summary.probability.is_none());
        assert_eq!(summary.missing_fields, vec!["sex"]);
    }

    #[test]
    fn status_serializes_snake_case() {
        let summary = PredictiveModelSummary::insufficient_data(ModelId::Herder, vec![]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "insufficient_data");
        assert_eq!(json["id"], "herder");
        assert!(json.get("probability").is_none());
    }

    #[test]
    fn missing_fields_records_absent_values_in_order() {
        let mut missing = MissingFields::new();
        assert_eq!(missing.require(Some(1), "a"), Some(1));
        assert_eq!(missing.require::<u8>(None, "b"), None);
        assert_eq!(missing.require_positive(f64::NAN, "c"), None);
        assert_eq!(missing.require_positive(4.0, "d"), Some(4.0));
        assert_eq!(missing.into_vec(), vec!["b", "c"]);
    }
}
