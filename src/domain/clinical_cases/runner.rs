//! Runs reference cases through the classifiers and reports agreement.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::GuidelineRouter;
use crate::domain::foundation::Timestamp;

use super::cases::ValidationCase;

/// Outcome of a single reference case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub case_id: String,
    pub passed: bool,
    pub actual_category: String,
    pub actual_recommendation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discrepancy: Option<String>,
}

/// Aggregate result of a validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub generated_at: Timestamp,
    pub total_cases: usize,
    pub passed: usize,
    pub failed: usize,
    /// Fraction of cases passed, in [0, 1]. Zero for an empty run.
    pub accuracy: f64,
    pub results: Vec<CaseOutcome>,
}

impl ValidationReport {
    /// Cases that did not match their expected outcome.
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.results.iter().filter(|r| !r.passed)
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Validation-run functions.
pub struct ValidationRunner;

impl ValidationRunner {
    /// Classifies every case and compares against its expectations.
    pub fn run(cases: &[ValidationCase], generated_at: Timestamp) -> ValidationReport {
        let results: Vec<CaseOutcome> = cases.iter().map(Self::run_case).collect();
        let passed = results.iter().filter(|r| r.passed).count();
        let total_cases = results.len();
        let accuracy = if total_cases == 0 {
            0.0
        } else {
            passed as f64 / total_cases as f64
        };

        ValidationReport {
            generated_at,
            total_cases,
            passed,
            failed: total_cases - passed,
            accuracy,
            results,
        }
    }

    /// Classifies one case.
    ///
    /// A case passes when the producing guideline, the category and the
    /// recommendation all match.
    pub fn run_case(case: &ValidationCase) -> CaseOutcome {
        let result = GuidelineRouter::classify(&case.input);

        let mut discrepancies = Vec::new();
        if result.guideline != case.guideline {
            discrepancies.push(format!(
                "guideline: expected {}, got {}",
                case.guideline, result.guideline
            ));
        }
        if result.category != case.expected_category {
            discrepancies.push(format!(
                "category: expected '{}', got '{}'",
                case.expected_category, result.category
            ));
        }
        if result.recommendation != case.expected_recommendation {
            discrepancies.push(format!(
                "recommendation: expected '{}', got '{}'",
                case.expected_recommendation, result.recommendation
            ));
        }

        CaseOutcome {
            case_id: case.id.clone(),
            passed: discrepancies.is_empty(),
            actual_category: result.category,
            actual_recommendation: result.recommendation,
            discrepancy: (!discrepancies.is_empty()).then(|| discrepancies.join("; ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clinical_cases::CasePackage;

    #[test]
    fn builtin_package_passes_completely() {
        let report = ValidationRunner::run(&CasePackage::builtin().cases, Timestamp::now());
        let failures: Vec<_> = report.failures().collect();
        assert!(failures.is_empty(), "unexpected failures: {:?}", failures);
        assert_eq!(report.accuracy, 1.0);
        assert!(report.all_passed());
    }

    #[test]
    fn mismatched_expectation_records_discrepancy() {
        let mut case = CasePackage::builtin().cases[0].clone();
        case.expected_category = "Something else".to_string();

        let outcome = ValidationRunner::run_case(&case);
        assert!(!outcome.passed);
        let discrepancy = outcome.discrepancy.unwrap();
        assert!(discrepancy.contains("category"));
        assert!(!discrepancy.contains("recommendation"));
    }

    #[test]
    fn wrong_guideline_is_a_discrepancy() {
        let mut case = CasePackage::builtin().cases[0].clone();
        case.guideline = crate::domain::foundation::GuidelineId::LungRads2022;
        let outcome = ValidationRunner::run_case(&case);
        assert!(outcome.discrepancy.unwrap().contains("guideline"));
    }

    #[test]
    fn accuracy_counts_failures() {
        let mut cases = CasePackage::builtin().cases[..4].to_vec();
        cases[3].expected_recommendation = "wrong".to_string();
        let report = ValidationRunner::run(&cases, Timestamp::now());
        assert_eq!(report.total_cases, 4);
        assert_eq!(report.passed, 3);
        assert_eq!(report.failed, 1);
        assert!((report.accuracy - 0.75).abs() < 1e-12);
    }

    #[test]
    fn empty_run_has_zero_accuracy() {
        let report = ValidationRunner::run(&[], Timestamp::now());
        assert_eq!(report.total_cases, 0);
        assert_eq!(report.accuracy, 0.0);
    }
}
