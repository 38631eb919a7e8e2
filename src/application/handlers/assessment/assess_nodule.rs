//! AssessNoduleHandler - Command handler for classifying a single nodule.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::domain::assessment::{AssessmentResult, GuidelineRouter};
use crate::domain::foundation::{AssessmentId, ClinicalContext, GuidelineVersion, Timestamp};
use crate::domain::nodule::AssessmentInput;
use crate::domain::predictive::{ModelId, PredictiveModelSummary, RiskModelCalculator};
use crate::ports::{InputValidationError, InputValidator};

/// Command to assess one nodule.
#[derive(Debug, Clone)]
pub struct AssessNoduleCommand {
    /// Patient, nodule and optional screening data.
    pub input: AssessmentInput,
}

/// Result of a successful assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessNoduleResult {
    pub assessment_id: AssessmentId,
    /// Guideline classification.
    pub assessment: AssessmentResult,
    /// Published version of the guideline that produced `assessment`.
    pub guideline: GuidelineVersion,
    /// Mayo, Brock and Herder summaries, in that order. Empty when the
    /// engine is configured without risk models.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub risk_models: Vec<PredictiveModelSummary>,
    /// Model best suited to the patient's clinical context.
    pub recommended_model: ModelId,
    pub assessed_at: Timestamp,
}

impl AssessNoduleResult {
    /// Summary for one model, if risk models were computed.
    pub fn risk_model(&self, id: ModelId) -> Option<&PredictiveModelSummary> {
        self.risk_models.iter().find(|s| s.id == id)
    }
}

/// Error type for nodule assessment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    #[error("Invalid assessment input: {0}")]
    InvalidInput(#[from] InputValidationError),
}

/// Handler for nodule assessments.
pub struct AssessNoduleHandler {
    validator: Arc<dyn InputValidator>,
    config: EngineConfig,
}

impl AssessNoduleHandler {
    pub fn new(validator: Arc<dyn InputValidator>, config: EngineConfig) -> Self {
        Self { validator, config }
    }

    pub fn handle(&self, cmd: AssessNoduleCommand) -> Result<AssessNoduleResult, AssessmentError> {
        let mut input = cmd.input;

        // 1. Validate the request shape
        self.validator.validate(&input)?;

        // 2. Fill the incidental risk level when the engine allows it to be omitted
        if !self.config.require_risk_level
            && input.patient.clinical_context == ClinicalContext::Incidental
            && input.patient.risk_level.is_none()
        {
            debug!(
                default_risk_level = ?self.config.default_risk_level,
                "Applying configured default risk level"
            );
            input.patient.risk_level = Some(self.config.default_risk_level);
        }

        // 3. Classify under exactly one guideline
        let assessment = GuidelineRouter::classify(&input);
        let guideline = assessment.guideline.version();

        // 4. Risk models
        let risk_models = if self.config.include_risk_models {
            RiskModelCalculator::compute_summaries(&input.patient, &input.nodule).to_vec()
        } else {
            Vec::new()
        };
        for summary in &risk_models {
            debug!(
                model = summary.id.as_str(),
                status = ?summary.status,
                "Risk model computed"
            );
        }

        let result = AssessNoduleResult {
            assessment_id: AssessmentId::new(),
            guideline,
            risk_models,
            recommended_model: RiskModelCalculator::recommended_model(
                input.patient.clinical_context,
            ),
            assessed_at: Timestamp::now(),
            assessment,
        };

        info!(
            assessment_id = %result.assessment_id,
            guideline = %result.assessment.guideline,
            category = %result.assessment.category,
            warnings = result.assessment.warnings.len(),
            "Nodule assessed"
        );

        Ok(result)
    }
}
