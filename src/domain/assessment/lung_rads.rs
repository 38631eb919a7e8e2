//! Lung-RADS v2022 classifier for screening CT.
//!
//! Decision order:
//! 1. Eligibility (screening context)
//! 2. Special categories, first match wins:
//!    significant finding, benign, inflammatory, airway, atypical cyst,
//!    benign juxtapleural/perifissural morphology
//! 3. Size bands by type, scan type, novelty and growth
//! 4. Spiculation escalation of 3/4A/4B to 4X
//! 5. Stepped management from the prior category and status
//!
//! Measurements are used as given; unlike the incidental pathway nothing
//! is rounded.

use crate::domain::foundation::GuidelineId;
use crate::domain::nodule::{
    AirwayLocation, AtypicalCystCategory, InflammatoryCategory, NoduleCharacteristics,
    NoduleType, PatientProfile, PriorStatus, ScanType, ScreeningExtension,
    SteppedManagementState,
};

use super::eligibility::{Applicability, EligibilityFilter, ExclusionReason};
use super::growth::GrowthEvaluator;
use super::lung_rads_category::LungRadsCategory;
use super::result::{
    AssessmentResult, NOT_APPLICABLE_CATEGORY, UNSUPPORTED_CATEGORY,
    WARNING_SOLID_COMPONENT_REQUIRED, WARNING_SOLID_EXCEEDS_DIAMETER, WARNING_UNKNOWN_NODULE_TYPE,
};

/// Largest juxtapleural/perifissural solid nodule treated as benign morphology.
pub const LUNG_RADS_BENIGN_MORPHOLOGY_MAX_MM: f64 = 10.0;

/// Baseline solid bands: <6 → 2, <8 → 3, <15 → 4A, otherwise 4B.
pub const BASELINE_SOLID_BANDS_MM: [f64; 3] = [6.0, 8.0, 15.0];

/// Bands for a solid nodule new on follow-up: <4 → 2, <6 → 3, <8 → 4A, otherwise 4B.
pub const NEW_SOLID_BANDS_MM: [f64; 3] = [4.0, 6.0, 8.0];

/// Growing (or new) nodules at or above this size are 4B.
pub const GROWTH_ESCALATION_MM: f64 = 8.0;

/// Ground-glass nodules at or above this size are category 3.
pub const GROUND_GLASS_CATEGORY_3_MM: f64 = 30.0;

/// Part-solid nodules at or above this total size are at least 4A.
pub const PART_SOLID_CATEGORY_4A_MM: f64 = 8.0;

/// Part-solid nodules with a solid component at or above this size are 4B.
pub const PART_SOLID_COMPONENT_4B_MM: f64 = 6.0;

pub const WARNING_INFLAMMATORY_CATEGORY_MISSING: &str =
    "Inflammatory finding without a category; defaulting to category 0";

pub const WARNING_AIRWAY_LOCATION_MISSING: &str =
    "Airway nodule without a location; defaulting to category 4A";

pub const WARNING_CYST_CATEGORY_MISSING: &str =
    "Atypical cyst without a category; defaulting to category 3";

const NOT_APPLICABLE_RATIONALE: &str = "Lung-RADS applies to screening populations";

/// A special-category rule fired before size-based classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpecialFinding {
    category: LungRadsCategory,
    label: &'static str,
    warning: Option<&'static str>,
}

impl SpecialFinding {
    fn new(category: LungRadsCategory, label: &'static str) -> Self {
        Self {
            category,
            label,
            warning: None,
        }
    }

    fn with_warning(mut self, warning: &'static str) -> Self {
        self.warning = Some(warning);
        self
    }
}

type SpecialRule = fn(&NoduleCharacteristics) -> Option<SpecialFinding>;

/// Special-category rules in priority order.
const SPECIAL_RULES: [SpecialRule; 6] = [
    significant_finding_rule,
    benign_rule,
    inflammatory_rule,
    airway_rule,
    atypical_cyst_rule,
    benign_morphology_rule,
];

fn significant_finding_rule(nodule: &NoduleCharacteristics) -> Option<SpecialFinding> {
    nodule
        .has_significant_finding
        .then(|| SpecialFinding::new(LungRadsCategory::Significant, "significant finding"))
}

fn benign_rule(nodule: &NoduleCharacteristics) -> Option<SpecialFinding> {
    nodule
        .is_benign
        .then(|| SpecialFinding::new(LungRadsCategory::One, "benign or no nodules"))
}

fn inflammatory_rule(nodule: &NoduleCharacteristics) -> Option<SpecialFinding> {
    if !nodule.is_inflammatory {
        return None;
    }
    let finding = match nodule.inflammatory_category {
        Some(InflammatoryCategory::Category0) => {
            SpecialFinding::new(LungRadsCategory::Zero, "inflammatory finding")
        }
        Some(InflammatoryCategory::Category2) => {
            SpecialFinding::new(LungRadsCategory::Two, "inflammatory finding")
        }
        None => SpecialFinding::new(LungRadsCategory::Zero, "inflammatory finding")
            .with_warning(WARNING_INFLAMMATORY_CATEGORY_MISSING),
    };
    Some(finding)
}

fn airway_rule(nodule: &NoduleCharacteristics) -> Option<SpecialFinding> {
    if !nodule.is_airway {
        return None;
    }
    if nodule.airway_persistent {
        return Some(SpecialFinding::new(
            LungRadsCategory::FourB,
            "airway nodule persistent on follow-up",
        ));
    }
    let finding = match nodule.airway_location {
        Some(AirwayLocation::SegmentalProximal) => SpecialFinding::new(
            LungRadsCategory::FourA,
            "segmental or proximal airway nodule",
        ),
        Some(AirwayLocation::Subsegmental) => {
            SpecialFinding::new(LungRadsCategory::Two, "subsegmental airway nodule")
        }
        None => SpecialFinding::new(LungRadsCategory::FourA, "airway nodule")
            .with_warning(WARNING_AIRWAY_LOCATION_MISSING),
    };
    Some(finding)
}

fn atypical_cyst_rule(nodule: &NoduleCharacteristics) -> Option<SpecialFinding> {
    if !nodule.is_atypical_cyst {
        return None;
    }
    let finding = match nodule.atypical_cyst_category {
        Some(AtypicalCystCategory::Category3) => {
            SpecialFinding::new(LungRadsCategory::Three, "atypical cyst")
        }
        Some(AtypicalCystCategory::Category4A) => {
            SpecialFinding::new(LungRadsCategory::FourA, "atypical cyst")
        }
        Some(AtypicalCystCategory::Category4B) => {
            SpecialFinding::new(LungRadsCategory::FourB, "atypical cyst")
        }
        None => SpecialFinding::new(LungRadsCategory::Three, "atypical cyst")
            .with_warning(WARNING_CYST_CATEGORY_MISSING),
    };
    Some(finding)
}

fn benign_morphology_rule(nodule: &NoduleCharacteristics) -> Option<SpecialFinding> {
    let qualifies = nodule.nodule_type == NoduleType::Solid
        && (nodule.is_juxtapleural || nodule.is_perifissural)
        && nodule.diameter_mm <= LUNG_RADS_BENIGN_MORPHOLOGY_MAX_MM
        && !nodule.is_spiculated();
    qualifies.then(|| {
        SpecialFinding::new(
            LungRadsCategory::Two,
            "juxtapleural/perifissural benign morphology",
        )
    })
}

/// Screening classification functions.
pub struct LungRadsClassifier;

impl LungRadsClassifier {
    /// Classifies a screening nodule.
    ///
    /// `stepped` carries the prior category and status; it is applied last
    /// and only when both halves are present.
    pub fn classify(
        patient: &PatientProfile,
        nodule: &NoduleCharacteristics,
        scan: &ScreeningExtension,
        stepped: &SteppedManagementState,
    ) -> AssessmentResult {
        if let Applicability::NotApplicable(reason) = EligibilityFilter::lung_rads(patient) {
            return Self::not_applicable(reason);
        }
        if nodule.nodule_type == NoduleType::Unsupported {
            return Self::unsupported();
        }

        let is_growing = GrowthEvaluator::is_significant_growth(
            nodule.diameter_mm,
            scan.prior_diameter_mm,
            scan.prior_scan_months_ago,
        );

        let mut rationale = vec![
            format!("Context: {}", scan.scan_type),
            if is_growing {
                "Growth >1.5mm/12m detected".to_string()
            } else {
                "No significant growth detected".to_string()
            },
            if nodule.is_new {
                "New nodule".to_string()
            } else {
                "Existing nodule".to_string()
            },
        ];
        let mut warnings: Vec<String> = Vec::new();

        let category = match SPECIAL_RULES.iter().find_map(|rule| rule(nodule)) {
            Some(finding) => {
                rationale.push(format!("Special category: {}", finding.label));
                if let Some(warning) = finding.warning {
                    warnings.push(warning.to_string());
                }
                finding.category
            }
            None => {
                let sized = Self::size_category(nodule, scan.scan_type, is_growing, &mut warnings);
                rationale.push(Self::describe_size(nodule));
                Self::apply_spiculation(sized, nodule, &mut rationale)
            }
        };

        let category = Self::apply_stepped_management(category, stepped, &mut rationale);

        if nodule.solid_component_exceeds_diameter() {
            warnings.push(WARNING_SOLID_EXCEEDS_DIAMETER.to_string());
        }

        let guidance = category.guidance();
        let mut result = AssessmentResult::new(
            GuidelineId::LungRads2022,
            category.as_str(),
            guidance.recommendation,
            guidance.timing,
            rationale.join(" | "),
        )
        .with_imaging_modality(guidance.imaging_modality);
        if let Some(probability) = guidance.malignancy_probability {
            result = result.with_malignancy_risk(probability);
        }
        result.warnings = warnings;
        result
    }

    /// Size-based category before spiculation and stepped management.
    pub fn size_category(
        nodule: &NoduleCharacteristics,
        scan_type: ScanType,
        is_growing: bool,
        warnings: &mut Vec<String>,
    ) -> LungRadsCategory {
        match nodule.nodule_type {
            NoduleType::Solid => Self::solid_category(nodule, scan_type, is_growing),
            NoduleType::GroundGlass => {
                if nodule.diameter_mm < GROUND_GLASS_CATEGORY_3_MM {
                    LungRadsCategory::Two
                } else {
                    LungRadsCategory::Three
                }
            }
            NoduleType::PartSolid => match nodule.solid_component_mm {
                None => {
                    warnings.push(WARNING_SOLID_COMPONENT_REQUIRED.to_string());
                    LungRadsCategory::Three
                }
                Some(solid) if solid >= PART_SOLID_COMPONENT_4B_MM => LungRadsCategory::FourB,
                Some(_) if nodule.diameter_mm >= PART_SOLID_CATEGORY_4A_MM => {
                    LungRadsCategory::FourA
                }
                Some(_) => LungRadsCategory::Three,
            },
            NoduleType::Unsupported => LungRadsCategory::Zero,
        }
    }

    fn solid_category(
        nodule: &NoduleCharacteristics,
        scan_type: ScanType,
        is_growing: bool,
    ) -> LungRadsCategory {
        let d = nodule.diameter_mm;
        if is_growing {
            return if d >= GROWTH_ESCALATION_MM {
                LungRadsCategory::FourB
            } else {
                LungRadsCategory::FourA
            };
        }

        // Existing, non-growing follow-up nodules use the baseline bands.
        let bands = match scan_type {
            ScanType::FollowUp if nodule.is_new => NEW_SOLID_BANDS_MM,
            _ => BASELINE_SOLID_BANDS_MM,
        };
        if d < bands[0] {
            LungRadsCategory::Two
        } else if d < bands[1] {
            LungRadsCategory::Three
        } else if d < bands[2] {
            LungRadsCategory::FourA
        } else {
            LungRadsCategory::FourB
        }
    }

    fn describe_size(nodule: &NoduleCharacteristics) -> String {
        match (nodule.nodule_type, nodule.solid_component_mm) {
            (NoduleType::PartSolid, Some(solid)) => format!(
                "Size: part-solid {}mm, solid component {}mm",
                nodule.diameter_mm, solid
            ),
            (NoduleType::PartSolid, None) => format!(
                "Size: part-solid {}mm, solid component not measured",
                nodule.diameter_mm
            ),
            (nodule_type, _) => format!("Size: {} {}mm", nodule_type, nodule.diameter_mm),
        }
    }

    fn apply_spiculation(
        category: LungRadsCategory,
        nodule: &NoduleCharacteristics,
        rationale: &mut Vec<String>,
    ) -> LungRadsCategory {
        if nodule.is_spiculated() && category.is_escalatable() {
            rationale.push(format!("Spiculation: upgraded {} to 4X", category));
            LungRadsCategory::FourX
        } else {
            category
        }
    }

    /// Applies stepped management to a freshly computed category.
    ///
    /// A stable prior 3 yields 2 and a stable prior 4A yields 3, regardless
    /// of the new category. Anything else passes through unchanged.
    pub fn apply_stepped_management(
        category: LungRadsCategory,
        stepped: &SteppedManagementState,
        rationale: &mut Vec<String>,
    ) -> LungRadsCategory {
        let (prior, stepped_to) = match stepped.complete() {
            Some((prior @ LungRadsCategory::Three, PriorStatus::Stable)) => {
                (prior, LungRadsCategory::Two)
            }
            Some((prior @ LungRadsCategory::FourA, PriorStatus::Stable)) => {
                (prior, LungRadsCategory::Three)
            }
            _ => return category,
        };
        rationale.push(format!(
            "Stepped management: prior {} stable, {} stepped to {}",
            prior, category, stepped_to
        ));
        stepped_to
    }

    fn not_applicable(reason: ExclusionReason) -> AssessmentResult {
        AssessmentResult::new(
            GuidelineId::LungRads2022,
            NOT_APPLICABLE_CATEGORY,
            "Use Fleischner or other guidance for incidental findings",
            "N/A",
            NOT_APPLICABLE_RATIONALE,
        )
        .with_warning(reason.message())
    }

    fn unsupported() -> AssessmentResult {
        AssessmentResult::new(
            GuidelineId::LungRads2022,
            UNSUPPORTED_CATEGORY,
            "Review input data",
            "N/A",
            "Nodule type not recognized",
        )
        .with_warning(WARNING_UNKNOWN_NODULE_TYPE)
    }
}
