//! Growth Evaluator - clinically significant size change between two scans.

use crate::domain::foundation::is_positive_measurement;

/// Growth above this many millimeters per 12 months is significant.
pub const GROWTH_THRESHOLD_MM_PER_12_MONTHS: f64 = 1.5;

/// Intervals up to this length are compared on the raw delta.
pub const ANNUALIZATION_WINDOW_MONTHS: f64 = 12.0;

/// Growth evaluation functions.
pub struct GrowthEvaluator;

impl GrowthEvaluator {
    /// Decides whether growth from `prior_mm` to `current_mm` is significant.
    ///
    /// # Algorithm
    /// - interval <= 12 months: significant iff delta > 1.5 mm
    /// - interval > 12 months: significant iff (delta / interval) * 12 > 1.5 mm
    ///
    /// # Edge Cases
    /// - Missing, zero or negative prior diameter: false
    /// - Zero or negative current diameter: false
    /// - Missing, zero or negative interval: false
    /// - Exactly 1.5 mm: false (strict inequality)
    /// - Shrinkage: false
    pub fn is_significant_growth(
        current_mm: f64,
        prior_mm: Option<f64>,
        interval_months: Option<f64>,
    ) -> bool {
        Self::normalized_change_mm(current_mm, prior_mm, interval_months)
            .map(|change| change > GROWTH_THRESHOLD_MM_PER_12_MONTHS)
            .unwrap_or(false)
    }

    /// Returns the change compared against the threshold, or None when the
    /// inputs cannot support a comparison.
    ///
    /// The raw delta is returned for intervals up to 12 months; longer
    /// intervals are annualized.
    pub fn normalized_change_mm(
        current_mm: f64,
        prior_mm: Option<f64>,
        interval_months: Option<f64>,
    ) -> Option<f64> {
        let prior_mm = prior_mm.filter(|p| is_positive_measurement(*p))?;
        if !is_positive_measurement(current_mm) {
            return None;
        }
        let interval_months = interval_months.filter(|m| m.is_finite() && *m > 0.0)?;

        let delta = current_mm - prior_mm;
        if interval_months <= ANNUALIZATION_WINDOW_MONTHS {
            Some(delta)
        } else {
            Some(delta / interval_months * ANNUALIZATION_WINDOW_MONTHS)
        }
    }
}
