//! Clinical cases module - Reference cases for expert panel review.
//!
//! The built-in package covers the size, type, multiplicity and exclusion
//! branches of the incidental guideline and the baseline, follow-up, growth,
//! subsolid, stepped-management and special-category branches of the
//! screening guideline. Packages can also be loaded from YAML or JSON.

mod cases;
mod runner;

pub use cases::{CasePackage, CasePackageError, ValidationCase, CASE_PACKAGE_VERSION};
pub use runner::{CaseOutcome, ValidationReport, ValidationRunner};
