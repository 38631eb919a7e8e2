//! Assessment engine configuration

use serde::Deserialize;

use crate::domain::nodule::RiskLevel;

/// Assessment engine configuration
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Compute the Mayo, Brock and Herder summaries with every assessment
    #[serde(default = "default_include_risk_models")]
    pub include_risk_models: bool,

    /// Reject incidental requests that omit the risk level
    #[serde(default = "default_require_risk_level")]
    pub require_risk_level: bool,

    /// Risk level applied to incidental requests that omit it when
    /// `require_risk_level` is off
    #[serde(default)]
    pub default_risk_level: RiskLevel,
}

impl EngineConfig {
    /// Configuration that accepts incidental requests without a risk level.
    pub fn relaxed() -> Self {
        Self {
            require_risk_level: false,
            ..Default::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            include_risk_models: default_include_risk_models(),
            require_risk_level: default_require_risk_level(),
            default_risk_level: RiskLevel::default(),
        }
    }
}

fn default_include_risk_models() -> bool {
    true
}

fn default_require_risk_level() -> bool {
    true
}
