//! Reference cases for expert review of both guidelines.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::assessment::LungRadsCategory;
use crate::domain::foundation::{GuidelineId, Timestamp};
use crate::domain::nodule::{
    AssessmentInput, NoduleCharacteristics, PatientProfile, PriorStatus, RiskLevel,
    ScreeningExtension, SteppedManagementState,
};

/// Version of the built-in case package.
pub const CASE_PACKAGE_VERSION: &str = "1.0.0";

/// Errors loading or exporting a case package.
#[derive(Debug, Error)]
pub enum CasePackageError {
    #[error("Failed to parse YAML case package: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse or write JSON case package: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate case id: {0}")]
    DuplicateId(String),
}

/// One reference case with its expected outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationCase {
    pub id: String,
    pub description: String,
    pub guideline: GuidelineId,
    pub input: AssessmentInput,
    pub expected_category: String,
    pub expected_recommendation: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
}

impl ValidationCase {
    fn new(
        id: &str,
        description: &str,
        guideline: GuidelineId,
        input: AssessmentInput,
        expected_category: &str,
        expected_recommendation: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            guideline,
            input,
            expected_category: expected_category.to_string(),
            expected_recommendation: expected_recommendation.to_string(),
            clinical_notes: None,
        }
    }

    fn with_notes(mut self, notes: &str) -> Self {
        self.clinical_notes = Some(notes.to_string());
        self
    }
}

/// A versioned collection of reference cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasePackage {
    pub version: String,
    pub cases: Vec<ValidationCase>,
}

/// Export envelope with per-guideline counts.
#[derive(Debug, Serialize)]
struct CasePackageExport<'a> {
    version: &'a str,
    generated_at: Timestamp,
    total_cases: usize,
    fleischner_cases: usize,
    lung_rads_cases: usize,
    cases: &'a [ValidationCase],
}

static BUILTIN_PACKAGE: Lazy<CasePackage> = Lazy::new(|| {
    let mut cases = fleischner_cases();
    cases.extend(lung_rads_cases());
    CasePackage {
        version: CASE_PACKAGE_VERSION.to_string(),
        cases,
    }
});

impl CasePackage {
    /// The package shipped with the engine.
    pub fn builtin() -> &'static CasePackage {
        &BUILTIN_PACKAGE
    }

    /// Loads a package from YAML.
    pub fn from_yaml(source: &str) -> Result<Self, CasePackageError> {
        let package: CasePackage = serde_yaml::from_str(source)?;
        package.check_unique_ids()?;
        Ok(package)
    }

    /// Loads a package from JSON.
    pub fn from_json(source: &str) -> Result<Self, CasePackageError> {
        let package: CasePackage = serde_json::from_str(source)?;
        package.check_unique_ids()?;
        Ok(package)
    }

    /// Pretty JSON export stamped with the generation time.
    pub fn to_json(&self, generated_at: Timestamp) -> Result<String, CasePackageError> {
        let export = CasePackageExport {
            version: &self.version,
            generated_at,
            total_cases: self.cases.len(),
            fleischner_cases: self.count_for(GuidelineId::Fleischner2017),
            lung_rads_cases: self.count_for(GuidelineId::LungRads2022),
            cases: &self.cases,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Number of cases for one guideline.
    pub fn count_for(&self, guideline: GuidelineId) -> usize {
        self.cases.iter().filter(|c| c.guideline == guideline).count()
    }

    fn check_unique_ids(&self) -> Result<(), CasePackageError> {
        let mut seen = std::collections::HashSet::new();
        for case in &self.cases {
            if !seen.insert(case.id.as_str()) {
                return Err(CasePackageError::DuplicateId(case.id.clone()));
            }
        }
        Ok(())
    }
}

// Case Builders

fn incidental(age: f64, risk: RiskLevel, nodule: NoduleCharacteristics) -> AssessmentInput {
    AssessmentInput::new(PatientProfile::incidental(age, risk), nodule)
}

fn screening(age: f64, nodule: NoduleCharacteristics, scan: ScreeningExtension) -> AssessmentInput {
    AssessmentInput::new(PatientProfile::screening(age), nodule).with_screening(scan)
}

fn new_nodule(mut nodule: NoduleCharacteristics) -> NoduleCharacteristics {
    nodule.is_new = true;
    nodule
}

fn fleischner_cases() -> Vec<ValidationCase> {
    use NoduleCharacteristics as N;
    let fleischner = GuidelineId::Fleischner2017;

    let mut perifissural = N::solid(9.0);
    perifissural.is_perifissural = true;

    vec![
        ValidationCase::new(
            "F-001",
            "Solid 4mm single, low risk",
            fleischner,
            incidental(55.0, RiskLevel::Low, N::solid(4.0)),
            "Solid <6mm (single, low risk)",
            "No routine follow-up",
        )
        .with_notes("Benign probability >99%"),
        ValidationCase::new(
            "F-002",
            "Solid 5mm single, high risk",
            fleischner,
            incidental(65.0, RiskLevel::High, N::solid(5.0)),
            "Solid <6mm (single, high risk)",
            "Optional CT at 12 months",
        ),
        ValidationCase::new(
            "F-003",
            "Solid 7mm single, low risk",
            fleischner,
            incidental(50.0, RiskLevel::Low, N::solid(7.0)),
            "Solid 6-8mm (single, low risk)",
            "CT at 6-12 months; consider CT at 18-24 months",
        ),
        ValidationCase::new(
            "F-004",
            "Solid 7mm single, high risk",
            fleischner,
            incidental(68.0, RiskLevel::High, N::solid(7.0)),
            "Solid 6-8mm (single, high risk)",
            "CT at 6-12 months; then CT at 18-24 months",
        ),
        ValidationCase::new(
            "F-005",
            "Solid 10mm single",
            fleischner,
            incidental(60.0, RiskLevel::High, N::solid(10.0)),
            "Solid >8mm (single)",
            "Consider CT at 3 months, PET/CT, or tissue sampling",
        ),
        ValidationCase::new(
            "F-006",
            "Solid 4mm multiple, low risk",
            fleischner,
            incidental(50.0, RiskLevel::Low, N::solid(4.0).multiple()),
            "Solid <6mm (multiple, low risk)",
            "No routine follow-up",
        ),
        ValidationCase::new(
            "F-007",
            "Solid 8mm multiple, high risk",
            fleischner,
            incidental(65.0, RiskLevel::High, N::solid(8.0).multiple()),
            "Solid ≥6mm (multiple, high risk)",
            "CT at 3-6 months; then CT at 18-24 months",
        ),
        ValidationCase::new(
            "F-008",
            "Ground-glass 4mm",
            fleischner,
            incidental(55.0, RiskLevel::Low, N::ground_glass(4.0)),
            "Ground-glass <6mm",
            "No routine follow-up",
        ),
        ValidationCase::new(
            "F-009",
            "Ground-glass 10mm",
            fleischner,
            incidental(60.0, RiskLevel::Low, N::ground_glass(10.0)),
            "Ground-glass ≥6mm",
            "CT at 6-12 months, then CT every 2 years until 5 years",
        ),
        ValidationCase::new(
            "F-010",
            "Part-solid 4mm",
            fleischner,
            incidental(55.0, RiskLevel::Low, N::part_solid(4.0, Some(2.0))),
            "Part-solid <6mm",
            "No routine follow-up",
        ),
        ValidationCase::new(
            "F-011",
            "Part-solid 10mm, solid 4mm",
            fleischner,
            incidental(60.0, RiskLevel::Low, N::part_solid(10.0, Some(4.0))),
            "Part-solid ≥6mm, solid <6mm",
            "CT at 3-6 months, then annual CT for 5 years",
        ),
        ValidationCase::new(
            "F-012",
            "Part-solid 12mm, solid 8mm",
            fleischner,
            incidental(62.0, RiskLevel::High, N::part_solid(12.0, Some(8.0))),
            "Part-solid, solid ≥6mm",
            "PET/CT, biopsy, or surgical excision",
        )
        .with_notes("High suspicion: solid component ≥6mm"),
        ValidationCase::new(
            "F-013",
            "Patient age 30, excluded",
            fleischner,
            incidental(30.0, RiskLevel::Low, N::solid(7.0)),
            "Not applicable",
            "Use alternative clinical guidance",
        )
        .with_notes("Fleischner applies to patients ≥35 years"),
        ValidationCase::new(
            "F-014",
            "Solid exactly 6mm, low risk",
            fleischner,
            incidental(50.0, RiskLevel::Low, N::solid(6.0)),
            "Solid 6-8mm (single, low risk)",
            "CT at 6-12 months; consider CT at 18-24 months",
        ),
        ValidationCase::new(
            "F-015",
            "Solid exactly 8mm, high risk",
            fleischner,
            incidental(65.0, RiskLevel::High, N::solid(8.0)),
            "Solid 6-8mm (single, high risk)",
            "CT at 6-12 months; then CT at 18-24 months",
        ),
        ValidationCase::new(
            "F-016",
            "Solid 5.6mm single, low risk, rounds to 6mm",
            fleischner,
            incidental(58.0, RiskLevel::Low, N::solid(5.6)),
            "Solid 6-8mm (single, low risk)",
            "CT at 6-12 months; consider CT at 18-24 months",
        ),
        ValidationCase::new(
            "F-017",
            "Perifissural solid 9mm",
            fleischner,
            incidental(61.0, RiskLevel::High, perifissural),
            "Perifissural nodule (benign morphology)",
            "No routine follow-up",
        ),
    ]
}

fn lung_rads_cases() -> Vec<ValidationCase> {
    use NoduleCharacteristics as N;
    use ScreeningExtension as Scan;
    let lung_rads = GuidelineId::LungRads2022;

    let mut significant = N::solid(6.0);
    significant.has_significant_finding = true;

    vec![
        ValidationCase::new(
            "LR-001",
            "Baseline solid 4mm",
            lung_rads,
            screening(60.0, N::solid(4.0), Scan::baseline()),
            "2",
            "Continue annual LDCT",
        ),
        ValidationCase::new(
            "LR-002",
            "Baseline solid 7mm",
            lung_rads,
            screening(62.0, N::solid(7.0), Scan::baseline()),
            "3",
            "LDCT",
        ),
        ValidationCase::new(
            "LR-003",
            "Baseline solid 10mm",
            lung_rads,
            screening(65.0, N::solid(10.0), Scan::baseline()),
            "4A",
            "LDCT; PET/CT if solid ≥8mm",
        ),
        ValidationCase::new(
            "LR-004",
            "Baseline solid 16mm",
            lung_rads,
            screening(68.0, N::solid(16.0), Scan::baseline()),
            "4B",
            "Diagnostic CT; PET/CT; biopsy",
        ),
        ValidationCase::new(
            "LR-005",
            "Follow-up new solid 3mm",
            lung_rads,
            screening(60.0, new_nodule(N::solid(3.0)), Scan::follow_up()),
            "2",
            "Continue annual LDCT",
        ),
        ValidationCase::new(
            "LR-006",
            "Follow-up new solid 5mm",
            lung_rads,
            screening(62.0, new_nodule(N::solid(5.0)), Scan::follow_up()),
            "3",
            "LDCT",
        ),
        ValidationCase::new(
            "LR-007",
            "Follow-up new solid 7mm",
            lung_rads,
            screening(64.0, new_nodule(N::solid(7.0)), Scan::follow_up()),
            "4A",
            "LDCT; PET/CT if solid ≥8mm",
        ),
        ValidationCase::new(
            "LR-008",
            "Follow-up new solid 10mm",
            lung_rads,
            screening(66.0, new_nodule(N::solid(10.0)), Scan::follow_up()),
            "4B",
            "Diagnostic CT; PET/CT; biopsy",
        ),
        ValidationCase::new(
            "LR-009",
            "Growth >1.5mm in 12 months, small nodule",
            lung_rads,
            screening(60.0, N::solid(7.0), Scan::follow_up_with_prior(4.0, 12.0)),
            "4A",
            "LDCT; PET/CT if solid ≥8mm",
        )
        .with_notes("3mm growth in 12 months exceeds threshold"),
        ValidationCase::new(
            "LR-010",
            "Growth >1.5mm in 12 months, large nodule",
            lung_rads,
            screening(62.0, N::solid(12.0), Scan::follow_up_with_prior(8.0, 12.0)),
            "4B",
            "Diagnostic CT; PET/CT; biopsy",
        )
        .with_notes("Growing nodule ≥8mm"),
        ValidationCase::new(
            "LR-011",
            "Ground-glass 25mm",
            lung_rads,
            screening(58.0, N::ground_glass(25.0), Scan::baseline()),
            "2",
            "Continue annual LDCT",
        ),
        ValidationCase::new(
            "LR-012",
            "Ground-glass 35mm",
            lung_rads,
            screening(60.0, N::ground_glass(35.0), Scan::baseline()),
            "3",
            "LDCT",
        ),
        ValidationCase::new(
            "LR-013",
            "Part-solid 12mm, solid 4mm",
            lung_rads,
            screening(62.0, N::part_solid(12.0, Some(4.0)), Scan::baseline()),
            "4A",
            "LDCT; PET/CT if solid ≥8mm",
        ),
        ValidationCase::new(
            "LR-014",
            "Part-solid 15mm, solid 8mm",
            lung_rads,
            screening(65.0, N::part_solid(15.0, Some(8.0)), Scan::baseline()),
            "4B",
            "Diagnostic CT; PET/CT; biopsy",
        ),
        ValidationCase::new(
            "LR-015",
            "Category 3 stable, stepped down to 2",
            lung_rads,
            screening(60.0, N::solid(7.0), Scan::follow_up_with_prior(7.0, 6.0))
                .with_stepped_management(SteppedManagementState::new(
                    LungRadsCategory::Three,
                    PriorStatus::Stable,
                )),
            "2",
            "Continue annual LDCT",
        )
        .with_notes("Stepped management: stable category 3 becomes category 2"),
        ValidationCase::new(
            "LR-016",
            "Baseline solid 7mm with spiculation",
            lung_rads,
            screening(63.0, N::solid(7.0).with_spiculation(true), Scan::baseline()),
            "4X",
            "Diagnostic CT; PET/CT; biopsy; consider multidisciplinary review",
        ),
        ValidationCase::new(
            "LR-017",
            "Significant non-nodule finding",
            lung_rads,
            screening(67.0, significant, Scan::baseline()),
            "S",
            "Manage significant findings per clinical judgment",
        ),
    ]
}
