//! RunValidationCasesHandler - Runs a reference case package for expert review.

use tracing::{info, warn};

use crate::domain::clinical_cases::{CasePackage, ValidationReport, ValidationRunner};
use crate::domain::foundation::Timestamp;

/// Command to run a case package.
#[derive(Debug, Clone, Default)]
pub struct RunValidationCasesCommand {
    /// Package to run; the built-in package when absent.
    pub package: Option<CasePackage>,
}

/// Handler for validation runs.
#[derive(Debug, Default)]
pub struct RunValidationCasesHandler;

impl RunValidationCasesHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, cmd: RunValidationCasesCommand) -> ValidationReport {
        let package = match &cmd.package {
            Some(package) => package,
            None => CasePackage::builtin(),
        };
        let report = ValidationRunner::run(&package.cases, Timestamp::now());

        for failure in report.failures() {
            warn!(
                case_id = %failure.case_id,
                discrepancy = failure.discrepancy.as_deref().unwrap_or_default(),
                "Validation case failed"
            );
        }
        info!(
            version = %package.version,
            total = report.total_cases,
            passed = report.passed,
            failed = report.failed,
            accuracy = report.accuracy,
            "Validation run complete"
        );

        report
    }
}
