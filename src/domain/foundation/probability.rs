//! Probability value object (closed 0-1 scale) and its coarse risk band.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Probabilities strictly below this are "low".
pub const LOW_RISK_CEILING: f64 = 0.05;

/// Probabilities strictly above this are "high".
pub const HIGH_RISK_FLOOR: f64 = 0.65;

/// Smallest distance a logistic-model estimate keeps from 0 and 1.
pub const LOGISTIC_FLOOR: f64 = 1e-12;

/// A malignancy probability between 0 and 1 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    /// Certain absence.
    pub const ZERO: Self = Self(0.0);

    /// Certain presence.
    pub const ONE: Self = Self(1.0);

    /// Creates a Probability, returning error if not finite or outside [0, 1].
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::not_finite("probability"));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("probability", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Converts log-odds to a probability with the logistic function.
    ///
    /// The result stays strictly inside (0, 1), saturating at
    /// [`LOGISTIC_FLOOR`] and `1 - LOGISTIC_FLOOR`. NaN maps to the floor.
    pub fn from_log_odds(log_odds: f64) -> Self {
        if log_odds.is_nan() {
            return Self(LOGISTIC_FLOOR);
        }
        let p = 1.0 / (1.0 + (-log_odds).exp());
        Self(p.clamp(LOGISTIC_FLOOR, 1.0 - LOGISTIC_FLOOR))
    }

    /// Converts odds (p / (1 - p)) back to a probability.
    pub fn from_odds(odds: f64) -> Self {
        if odds.is_nan() || odds <= 0.0 {
            return Self::ZERO;
        }
        if odds.is_infinite() {
            return Self::ONE;
        }
        Self((odds / (1.0 + odds)).clamp(0.0, 1.0))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the odds p / (1 - p). Infinite at p = 1.
    pub fn odds(&self) -> f64 {
        if self.0 >= 1.0 {
            f64::INFINITY
        } else {
            self.0 / (1.0 - self.0)
        }
    }

    /// Returns the value on a 0-100 scale.
    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Returns the risk band this probability falls into.
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_probability(*self)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.as_percent())
    }
}

/// Coarse partition of a continuous malignancy probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Intermediate,
    High,
}

impl RiskBand {
    /// Partitions a probability: below 5% is low, above 65% is high.
    ///
    /// Both boundaries belong to the intermediate band.
    pub fn from_probability(probability: Probability) -> Self {
        let p = probability.value();
        if p < LOW_RISK_CEILING {
            RiskBand::Low
        } else if p > HIGH_RISK_FLOOR {
            RiskBand::High
        } else {
            RiskBand::Intermediate
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Intermediate => "Intermediate",
            RiskBand::High => "High",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
