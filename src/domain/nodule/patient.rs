//! Patient profile and the demographic/risk-factor enumerations.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ClinicalContext;

/// Clinical risk level used by the incidental-finding guideline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    High,
}

impl RiskLevel {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low risk",
            RiskLevel::High => "high risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
}

impl SmokingStatus {
    /// Current or former smokers count as ever-smokers.
    pub fn is_ever_smoker(&self) -> bool {
        matches!(self, SmokingStatus::Former | SmokingStatus::Current)
    }
}

/// History of cancer outside the thorax, banded by time since diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtrathoracicCancerHistory {
    #[serde(rename = "none")]
    NoHistory,
    /// Diagnosed more than five years ago.
    #[serde(rename = "over5y")]
    Over5Years,
    /// Diagnosed within the last five years.
    #[serde(rename = "recent")]
    Recent,
}

/// Patient attributes supplied with every assessment.
///
/// Exclusion flags default to false. Demographic fields are optional and are
/// only read by the risk models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub clinical_context: ClinicalContext,

    /// Age in years.
    pub age: f64,

    /// Only meaningful in the incidental context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,

    #[serde(default)]
    pub has_known_malignancy: bool,

    #[serde(default)]
    pub is_immunocompromised: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking_status: Option<SmokingStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extrathoracic_cancer_history: Option<ExtrathoracicCancerHistory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_family_history: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_emphysema: Option<bool>,
}

impl PatientProfile {
    /// Creates a profile with only the context and age set.
    pub fn new(clinical_context: ClinicalContext, age: f64) -> Self {
        Self {
            clinical_context,
            age,
            risk_level: None,
            has_known_malignancy: false,
            is_immunocompromised: false,
            sex: None,
            smoking_status: None,
            extrathoracic_cancer_history: None,
            has_family_history: None,
            has_emphysema: None,
        }
    }

    /// Creates an incidental-context profile with a risk level.
    pub fn incidental(age: f64, risk_level: RiskLevel) -> Self {
        Self {
            risk_level: Some(risk_level),
            ..Self::new(ClinicalContext::Incidental, age)
        }
    }

    /// Creates a screening-context profile.
    pub fn screening(age: f64) -> Self {
        Self::new(ClinicalContext::Screening, age)
    }

    /// Sets the known-malignancy exclusion flag.
    pub fn with_known_malignancy(mut self) -> Self {
        self.has_known_malignancy = true;
        self
    }

    /// Sets the immunocompromised exclusion flag.
    pub fn with_immunocompromise(mut self) -> Self {
        self.is_immunocompromised = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incidental_profile_sets_context_and_risk() {
        let patient = PatientProfile::incidental(50.0, RiskLevel::High);
        assert_eq!(patient.clinical_context, ClinicalContext::Incidental);
        assert_eq!(patient.risk_level, Some(RiskLevel::High));
        assert!(!patient.has_known_malignancy);
    }

    #[test]
    fn ever_smoker_covers_former_and_current() {
        assert!(SmokingStatus::Current.is_ever_smoker());
        assert!(SmokingStatus::Former.is_ever_smoker());
        assert!(!SmokingStatus::Never.is_ever_smoker());
    }

    #[test]
    fn deserializes_minimal_profile_with_defaults() {
        let json = r#"{ "clinical_context": "incidental", "age": 61 }"#;
        let patient: PatientProfile = serde_json::from_str(json).unwrap();
        assert_eq!(patient.age, 61.0);
        assert!(patient.risk_level.is_none());
        assert!(!patient.is_immunocompromised);
        assert!(patient.smoking_status.is_none());
    }

    #[test]
    fn deserializes_cancer_history_bands() {
        let json = r#"{
            "clinical_context": "incidental",
            "age": 61,
            "extrathoracic_cancer_history": "over5y",
            "smoking_status": "former",
            "sex": "female"
        }"#;
        let patient: PatientProfile = serde_json::from_str(json).unwrap();
        assert_eq!(
            patient.extrathoracic_cancer_history,
            Some(ExtrathoracicCancerHistory::Over5Years)
        );
        assert_eq!(patient.sex, Some(Sex::Female));
    }
}
