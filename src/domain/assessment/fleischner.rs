//! Fleischner 2017 classifier for incidental pulmonary nodules.
//!
//! Decision order:
//! 1. Eligibility (age, known malignancy, immunocompromise)
//! 2. Perifissural benign-morphology override (solid, ≤10mm)
//! 3. Size/type/multiplicity/risk table
//!
//! Diameters are rounded to the nearest millimeter before any threshold is
//! applied. Every result's rationale ends with the decisive factors in
//! brackets, e.g. `[solid, 6mm, single, low risk]`.

use crate::domain::foundation::{round_to_nearest_mm, GuidelineId};
use crate::domain::nodule::{NoduleCharacteristics, NoduleType, PatientProfile, RiskLevel};

use super::eligibility::{Applicability, EligibilityFilter, ExclusionReason};
use super::result::{
    AssessmentResult, NOT_APPLICABLE_CATEGORY, UNSUPPORTED_CATEGORY, WARNING_HIGHLY_SUSPICIOUS,
    WARNING_SOLID_COMPONENT_REQUIRED, WARNING_SOLID_EXCEEDS_DIAMETER, WARNING_UNKNOWN_NODULE_TYPE,
};

/// Solid nodules below this size need no routine follow-up at low risk.
pub const FLEISCHNER_SMALL_NODULE_MM: f64 = 6.0;

/// Upper bound (inclusive) of the intermediate solid band.
pub const FLEISCHNER_INTERMEDIATE_MAX_MM: f64 = 8.0;

/// A part-solid component at or above this size is highly suspicious.
pub const FLEISCHNER_SUSPICIOUS_SOLID_COMPONENT_MM: f64 = 6.0;

/// Largest perifissural solid nodule that qualifies for the benign override.
pub const FLEISCHNER_PERIFISSURAL_MAX_MM: f64 = 10.0;

pub const WARNING_RISK_LEVEL_ASSUMED: &str = "Risk level not provided; assuming low risk";

/// Incidental-finding classification functions.
pub struct FleischnerClassifier;

impl FleischnerClassifier {
    /// Classifies an incidental nodule.
    ///
    /// Never fails: ineligible patients and unknown nodule types produce a
    /// result with an explanatory warning instead.
    pub fn classify(patient: &PatientProfile, nodule: &NoduleCharacteristics) -> AssessmentResult {
        if let Applicability::NotApplicable(reason) = EligibilityFilter::fleischner(patient) {
            return Self::not_applicable(reason);
        }

        let findings = Findings::from_inputs(patient, nodule);

        let mut result = match (nodule.nodule_type, nodule.is_multiple) {
            (NoduleType::Solid, _)
                if nodule.is_perifissural && findings.diameter <= FLEISCHNER_PERIFISSURAL_MAX_MM =>
            {
                Self::perifissural(&findings)
            }
            (NoduleType::Solid, false) => Self::solid_single(&findings),
            (NoduleType::Solid, true) => Self::solid_multiple(&findings),
            (NoduleType::GroundGlass, false) => Self::ground_glass_single(&findings),
            (NoduleType::PartSolid, false) => Self::part_solid_single(&findings),
            (NoduleType::GroundGlass, true) | (NoduleType::PartSolid, true) => {
                Self::subsolid_multiple(&findings)
            }
            (NoduleType::Unsupported, _) => Self::unsupported(),
        };

        if patient.risk_level.is_none() {
            result.push_warning(WARNING_RISK_LEVEL_ASSUMED);
        }
        if nodule.solid_component_exceeds_diameter() {
            result.push_warning(WARNING_SOLID_EXCEEDS_DIAMETER);
        }
        result
    }

    fn not_applicable(reason: ExclusionReason) -> AssessmentResult {
        AssessmentResult::new(
            GuidelineId::Fleischner2017,
            NOT_APPLICABLE_CATEGORY,
            "Use alternative clinical guidance",
            "N/A",
            reason.message(),
        )
        .with_warning(reason.message())
    }

    fn unsupported() -> AssessmentResult {
        AssessmentResult::new(
            GuidelineId::Fleischner2017,
            UNSUPPORTED_CATEGORY,
            "Review input data",
            "N/A",
            "Nodule type not recognized",
        )
        .with_warning(WARNING_UNKNOWN_NODULE_TYPE)
    }

    fn perifissural(findings: &Findings) -> AssessmentResult {
        findings.result(
            "Perifissural nodule (benign morphology)",
            "No routine follow-up",
            "None",
            "Perifissural nodules with typical benign morphology are rarely malignant",
            Factors::SIZE | Factors::PERIFISSURAL,
        )
    }

    // Solid Nodule Tables

    fn solid_single(findings: &Findings) -> AssessmentResult {
        let d = findings.diameter;
        if d < FLEISCHNER_SMALL_NODULE_MM {
            return match findings.risk {
                RiskLevel::Low => findings.result(
                    "Solid <6mm (single, low risk)",
                    "No routine follow-up",
                    "None",
                    "Malignancy risk <1% in low-risk patients",
                    Factors::SIZE | Factors::MULTIPLICITY | Factors::RISK,
                ),
                RiskLevel::High => findings.result(
                    "Solid <6mm (single, high risk)",
                    "Optional CT at 12 months",
                    "12 months (optional)",
                    "Higher pretest probability; consider follow-up if morphology is suspicious",
                    Factors::SIZE | Factors::MULTIPLICITY | Factors::RISK,
                ),
            };
        }

        if d <= FLEISCHNER_INTERMEDIATE_MAX_MM {
            return match findings.risk {
                RiskLevel::Low => findings.result(
                    "Solid 6-8mm (single, low risk)",
                    "CT at 6-12 months; consider CT at 18-24 months",
                    "6-12 months (consider 18-24)",
                    "Establish stability; malignancy risk ~0.5-2%",
                    Factors::SIZE | Factors::MULTIPLICITY | Factors::RISK,
                ),
                RiskLevel::High => findings.result(
                    "Solid 6-8mm (single, high risk)",
                    "CT at 6-12 months; then CT at 18-24 months",
                    "6-12 months; then 18-24 months",
                    "Higher risk warrants two follow-up scans",
                    Factors::SIZE | Factors::MULTIPLICITY | Factors::RISK,
                ),
            };
        }

        findings
            .result(
                "Solid >8mm (single)",
                "Consider CT at 3 months, PET/CT, or tissue sampling",
                "3 months (or as indicated)",
                "Larger solid nodules merit prompt further evaluation",
                Factors::SIZE | Factors::MULTIPLICITY,
            )
            .with_malignancy_risk("~3%")
    }

    fn solid_multiple(findings: &Findings) -> AssessmentResult {
        let factors = Factors::SIZE | Factors::MULTIPLICITY | Factors::RISK;
        match (findings.diameter < FLEISCHNER_SMALL_NODULE_MM, findings.risk) {
            (true, RiskLevel::Low) => findings.result(
                "Solid <6mm (multiple, low risk)",
                "No routine follow-up",
                "None",
                "Very low malignancy risk in low-risk patients",
                factors,
            ),
            (true, RiskLevel::High) => findings.result(
                "Solid <6mm (multiple, high risk)",
                "Optional CT at 12 months",
                "12 months (optional)",
                "Higher baseline risk; consider follow-up if morphology is suspicious",
                factors,
            ),
            (false, RiskLevel::Low) => findings.result(
                "Solid ≥6mm (multiple, low risk)",
                "CT at 3-6 months; consider CT at 18-24 months",
                "3-6 months (consider 18-24)",
                "Multiple nodules need short-term follow-up to assess stability",
                factors,
            ),
            (false, RiskLevel::High) => findings.result(
                "Solid ≥6mm (multiple, high risk)",
                "CT at 3-6 months; then CT at 18-24 months",
                "3-6 months; then 18-24 months",
                "High-risk patients need two follow-up scans",
                factors,
            ),
        }
    }

    // Subsolid Nodule Tables

    fn ground_glass_single(findings: &Findings) -> AssessmentResult {
        if findings.diameter < FLEISCHNER_SMALL_NODULE_MM {
            findings.result(
                "Ground-glass <6mm",
                "No routine follow-up",
                "None",
                "Very low malignancy risk; avoid overtreatment",
                Factors::SIZE | Factors::MULTIPLICITY,
            )
        } else {
            findings.result(
                "Ground-glass ≥6mm",
                "CT at 6-12 months, then CT every 2 years until 5 years",
                "6-12 months; then every 2 years until 5 years",
                "Persistent ground-glass nodules ≥6mm warrant long-term surveillance",
                Factors::SIZE | Factors::MULTIPLICITY,
            )
        }
    }

    fn part_solid_single(findings: &Findings) -> AssessmentResult {
        if findings.diameter < FLEISCHNER_SMALL_NODULE_MM {
            return findings.result(
                "Part-solid <6mm",
                "No routine follow-up",
                "None",
                "Small part-solid nodules are rarely malignant",
                Factors::SIZE | Factors::MULTIPLICITY,
            );
        }

        match findings.solid_component {
            None => findings
                .result(
                    "Part-solid (solid component unknown)",
                    "Measure solid component; management depends on solid size",
                    "Pending measurement",
                    "Solid component size drives risk stratification",
                    Factors::SIZE | Factors::MULTIPLICITY | Factors::SOLID_COMPONENT,
                )
                .with_warning(WARNING_SOLID_COMPONENT_REQUIRED),
            Some(solid) if solid < FLEISCHNER_SUSPICIOUS_SOLID_COMPONENT_MM => findings.result(
                "Part-solid ≥6mm, solid <6mm",
                "CT at 3-6 months, then annual CT for 5 years",
                "3-6 months; then annually for 5 years",
                "Persistent part-solid nodules carry rising risk; annual surveillance advised",
                Factors::SIZE | Factors::MULTIPLICITY | Factors::SOLID_COMPONENT,
            ),
            Some(_) => findings
                .result(
                    "Part-solid, solid ≥6mm",
                    "PET/CT, biopsy, or surgical excision",
                    "As indicated",
                    "A solid component ≥6mm is highly suspicious",
                    Factors::SIZE | Factors::MULTIPLICITY | Factors::SOLID_COMPONENT,
                )
                .with_malignancy_risk("High suspicion")
                .with_warning(WARNING_HIGHLY_SUSPICIOUS),
        }
    }

    fn subsolid_multiple(findings: &Findings) -> AssessmentResult {
        if findings.diameter < FLEISCHNER_SMALL_NODULE_MM {
            let category = match findings.nodule_type {
                NoduleType::PartSolid => "Part-solid <6mm (multiple)",
                _ => "Ground-glass <6mm (multiple)",
            };
            let factors = Factors::SIZE | Factors::MULTIPLICITY | Factors::RISK;
            let rationale =
                "Multiple small subsolid nodules need short-term confirmation; consider infectious causes";
            return match findings.risk {
                RiskLevel::High => findings.result(
                    category,
                    "CT at 3-6 months; if stable consider CT at 2 and 4 years",
                    "3-6 months (consider 2 and 4 years)",
                    rationale,
                    factors,
                ),
                RiskLevel::Low => findings.result(
                    category,
                    "CT at 3-6 months to confirm persistence; no routine follow-up if stable",
                    "3-6 months",
                    rationale,
                    factors,
                ),
            };
        }

        if findings.nodule_type == NoduleType::GroundGlass {
            return findings.result(
                "Ground-glass ≥6mm (multiple)",
                "CT at 3-6 months; subsequent management based on most suspicious nodule",
                "3-6 months",
                "The dominant nodule guides management; persistent multiple ground-glass nodules may be multifocal disease",
                Factors::SIZE | Factors::MULTIPLICITY,
            );
        }

        let factors = Factors::SIZE | Factors::MULTIPLICITY | Factors::SOLID_COMPONENT;
        match findings.solid_component {
            None => findings
                .result(
                    "Part-solid ≥6mm (multiple, solid unknown)",
                    "Measure solid component; CT at 3-6 months; manage based on dominant nodule",
                    "3-6 months",
                    "Solid component size of the dominant nodule drives management",
                    factors,
                )
                .with_warning(WARNING_SOLID_COMPONENT_REQUIRED),
            Some(solid) if solid < FLEISCHNER_SUSPICIOUS_SOLID_COMPONENT_MM => findings.result(
                "Part-solid ≥6mm, solid <6mm (multiple)",
                "CT at 3-6 months; if persistent, annual CT for 5 years (dominant nodule)",
                "3-6 months; then annually for 5 years",
                "Persistent dominant part-solid nodule needs long-term surveillance",
                factors,
            ),
            Some(_) => findings
                .result(
                    "Part-solid ≥6mm, solid ≥6mm (multiple)",
                    "CT at 3-6 months; consider PET/CT, biopsy, or surgical excision if persistent",
                    "3-6 months (then diagnostic workup)",
                    "A persistent solid component ≥6mm in the dominant nodule is highly suspicious",
                    factors,
                )
                .with_malignancy_risk("High suspicion")
                .with_warning(WARNING_HIGHLY_SUSPICIOUS),
        }
    }
}

/// Which inputs are named in the rationale's factor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Factors(u8);

impl Factors {
    const SIZE: Factors = Factors(1);
    const MULTIPLICITY: Factors = Factors(1 << 1);
    const RISK: Factors = Factors(1 << 2);
    const SOLID_COMPONENT: Factors = Factors(1 << 3);
    const PERIFISSURAL: Factors = Factors(1 << 4);

    fn contains(self, other: Factors) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Factors {
    type Output = Factors;

    fn bitor(self, rhs: Factors) -> Factors {
        Factors(self.0 | rhs.0)
    }
}

/// Normalized inputs for one classification.
struct Findings {
    nodule_type: NoduleType,
    diameter: f64,
    measured_diameter: f64,
    solid_component: Option<f64>,
    is_multiple: bool,
    risk: RiskLevel,
    risk_assumed: bool,
}

impl Findings {
    fn from_inputs(patient: &PatientProfile, nodule: &NoduleCharacteristics) -> Self {
        Self {
            nodule_type: nodule.nodule_type,
            diameter: round_to_nearest_mm(nodule.diameter_mm),
            measured_diameter: nodule.diameter_mm,
            solid_component: nodule.solid_component_mm.map(round_to_nearest_mm),
            is_multiple: nodule.is_multiple,
            risk: patient.risk_level.unwrap_or_default(),
            risk_assumed: patient.risk_level.is_none(),
        }
    }

    fn result(
        &self,
        category: &str,
        recommendation: &str,
        follow_up_interval: &str,
        rationale: &str,
        factors: Factors,
    ) -> AssessmentResult {
        AssessmentResult::new(
            GuidelineId::Fleischner2017,
            category,
            recommendation,
            follow_up_interval,
            format!("{} [{}]", rationale, self.describe(factors)),
        )
    }

    fn describe(&self, factors: Factors) -> String {
        let mut parts = vec![self.nodule_type.to_string()];

        if factors.contains(Factors::SIZE) {
            if self.diameter == self.measured_diameter {
                parts.push(format!("{}mm", self.diameter));
            } else {
                parts.push(format!(
                    "{}mm (measured {}mm)",
                    self.diameter, self.measured_diameter
                ));
            }
        }
        if factors.contains(Factors::SOLID_COMPONENT) {
            match self.solid_component {
                Some(solid) => parts.push(format!("solid component {}mm", solid)),
                None => parts.push("solid component not measured".to_string()),
            }
        }
        if factors.contains(Factors::PERIFISSURAL) {
            parts.push("perifissural".to_string());
        }
        if factors.contains(Factors::MULTIPLICITY) {
            parts.push(if self.is_multiple { "multiple" } else { "single" }.to_string());
        }
        if factors.contains(Factors::RISK) {
            if self.risk_assumed {
                parts.push(format!("{} (assumed)", self.risk.label()));
            } else {
                parts.push(self.risk.label().to_string());
            }
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low_risk() -> PatientProfile {
        PatientProfile::incidental(60.0, RiskLevel::Low)
    }

    fn high_risk() -> PatientProfile {
        PatientProfile::incidental(60.0, RiskLevel::High)
    }

    // Eligibility Tests

    #[test]
    fn classify_under_35_not_applicable() {
        let patient = PatientProfile::incidental(30.0, RiskLevel::Low);
        let result = FleischnerClassifier::classify(&patient, &NoduleCharacteristics::solid(7.0));
        assert_eq!(result.category, NOT_APPLICABLE_CATEGORY);
        assert_eq!(result.recommendation, "Use alternative clinical guidance");
        assert!(result.warnings[0].contains("≥35"));
    }

    #[test]
    fn classify_known_malignancy_not_applicable() {
        let patient = low_risk().with_known_malignancy();
        let result = FleischnerClassifier::classify(&patient, &NoduleCharacteristics::solid(7.0));
        assert!(result.is_not_applicable());
        assert!(result.has_warning(ExclusionReason::KnownMalignancy.message()));
    }

    #[test]
    fn classify_immunocompromised_not_applicable() {
        let patient = low_risk().with_immunocompromise();
        let result = FleischnerClassifier::classify(&patient, &NoduleCharacteristics::solid(7.0));
        assert_eq!(result.rationale, ExclusionReason::Immunocompromised.message());
    }

    // Solid Nodule Tests

    #[test]
    fn solid_small_low_risk_no_follow_up() {
        let result = FleischnerClassifier::classify(&low_risk(), &NoduleCharacteristics::solid(4.0));
        assert_eq!(result.category, "Solid <6mm (single, low risk)");
        assert_eq!(result.recommendation, "No routine follow-up");
        assert!(result.rationale.ends_with("[solid, 4mm, single, low risk]"));
    }

    #[test]
    fn solid_small_high_risk_optional_follow_up() {
        let result = FleischnerClassifier::classify(&high_risk(), &NoduleCharacteristics::solid(5.0));
        assert_eq!(result.follow_up_interval, "12 months (optional)");
    }

    #[test]
    fn solid_rounds_up_into_intermediate_band() {
        let result = FleischnerClassifier::classify(&low_risk(), &NoduleCharacteristics::solid(5.6));
        assert_eq!(result.category, "Solid 6-8mm (single, low risk)");
        assert!(result.rationale.contains("6mm (measured 5.6mm)"));
    }

    #[test]
    fn solid_rounds_down_below_intermediate_band() {
        let result = FleischnerClassifier::classify(&low_risk(), &NoduleCharacteristics::solid(5.4));
        assert_eq!(result.category, "Solid <6mm (single, low risk)");
    }

    #[test]
    fn solid_eight_mm_is_intermediate() {
        let result = FleischnerClassifier::classify(&high_risk(), &NoduleCharacteristics::solid(8.0));
        assert_eq!(result.category, "Solid 6-8mm (single, high risk)");
        assert_eq!(result.follow_up_interval, "6-12 months; then 18-24 months");
    }

    #[test]
    fn solid_large_carries_malignancy_risk() {
        let result = FleischnerClassifier::classify(&low_risk(), &NoduleCharacteristics::solid(9.0));
        assert_eq!(result.category, "Solid >8mm (single)");
        assert_eq!(result.malignancy_risk.as_deref(), Some("~3%"));
    }

    #[test]
    fn solid_multiple_uses_multiple_table() {
        let nodule = NoduleCharacteristics::solid(7.0).multiple();
        let result = FleischnerClassifier::classify(&high_risk(), &nodule);
        assert_eq!(result.category, "Solid ≥6mm (multiple, high risk)");
        assert!(result.rationale.contains("multiple"));
    }

    #[test]
    fn perifissural_solid_overrides_size_table() {
        let mut nodule = NoduleCharacteristics::solid(9.6);
        nodule.is_perifissural = true;
        let result = FleischnerClassifier::classify(&high_risk(), &nodule);
        assert_eq!(result.category, "Perifissural nodule (benign morphology)");
        assert_eq!(result.recommendation, "No routine follow-up");
    }

    #[test]
    fn perifissural_over_ten_mm_uses_size_table() {
        let mut nodule = NoduleCharacteristics::solid(10.6);
        nodule.is_perifissural = true;
        let result = FleischnerClassifier::classify(&low_risk(), &nodule);
        assert_eq!(result.category, "Solid >8mm (single)");
    }

    #[test]
    fn missing_risk_level_defaults_to_low_with_warning() {
        let patient = PatientProfile::new(crate::domain::foundation::ClinicalContext::Incidental, 60.0);
        let result = FleischnerClassifier::classify(&patient, &NoduleCharacteristics::solid(7.0));
        assert_eq!(result.category, "Solid 6-8mm (single, low risk)");
        assert!(result.has_warning(WARNING_RISK_LEVEL_ASSUMED));
        assert!(result.rationale.contains("low risk (assumed)"));
    }

    // Subsolid Nodule Tests

    #[test]
    fn ground_glass_large_surveillance() {
        let result =
            FleischnerClassifier::classify(&low_risk(), &NoduleCharacteristics::ground_glass(10.0));
        assert_eq!(result.category, "Ground-glass ≥6mm");
        assert!(result.recommendation.contains("every 2 years"));
    }

    #[test]
    fn part_solid_unknown_component_warns() {
        let result =
            FleischnerClassifier::classify(&low_risk(), &NoduleCharacteristics::part_solid(10.0, None));
        assert!(result.has_warning(WARNING_SOLID_COMPONENT_REQUIRED));
    }

    #[test]
    fn part_solid_small_component_annual_surveillance() {
        let nodule = NoduleCharacteristics::part_solid(10.0, Some(4.0));
        let result = FleischnerClassifier::classify(&low_risk(), &nodule);
        assert_eq!(result.category, "Part-solid ≥6mm, solid <6mm");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn part_solid_large_component_highly_suspicious() {
        let nodule = NoduleCharacteristics::part_solid(12.0, Some(7.0));
        let result = FleischnerClassifier::classify(&low_risk(), &nodule);
        assert!(result.has_warning(WARNING_HIGHLY_SUSPICIOUS));
        assert!(result.rationale.contains("solid component 7mm"));
    }

    #[test]
    fn part_solid_small_total_ignores_component() {
        let nodule = NoduleCharacteristics::part_solid(5.0, None);
        let result = FleischnerClassifier::classify(&low_risk(), &nodule);
        assert_eq!(result.category, "Part-solid <6mm");
        assert!(!result.has_warning(WARNING_SOLID_COMPONENT_REQUIRED));
    }

    #[test]
    fn multiple_small_subsolid_high_risk_mentions_two_and_four_years() {
        let nodule = NoduleCharacteristics::ground_glass(4.0).multiple();
        let result = FleischnerClassifier::classify(&high_risk(), &nodule);
        assert!(result.recommendation.contains("2 and 4 years"));
    }

    #[test]
    fn multiple_part_solid_large_component_highly_suspicious() {
        let nodule = NoduleCharacteristics::part_solid(12.0, Some(8.0)).multiple();
        let result = FleischnerClassifier::classify(&low_risk(), &nodule);
        assert_eq!(result.category, "Part-solid ≥6mm, solid ≥6mm (multiple)");
        assert!(result.has_warning(WARNING_HIGHLY_SUSPICIOUS));
    }

    // Input Consistency Tests

    #[test]
    fn solid_component_larger_than_nodule_warns() {
        let nodule = NoduleCharacteristics::part_solid(8.0, Some(9.0));
        let result = FleischnerClassifier::classify(&low_risk(), &nodule);
        assert!(result.has_warning(WARNING_SOLID_EXCEEDS_DIAMETER));
    }

    #[test]
    fn unsupported_type_returns_review_result() {
        let nodule = NoduleCharacteristics::new(NoduleType::Unsupported, 7.0);
        let result = FleischnerClassifier::classify(&low_risk(), &nodule);
        assert_eq!(result.category, UNSUPPORTED_CATEGORY);
        assert_eq!(result.recommendation, "Review input data");
        assert!(result.has_warning(WARNING_UNKNOWN_NODULE_TYPE));
    }
}
