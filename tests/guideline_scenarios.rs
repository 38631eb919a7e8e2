//! Integration tests for guideline classification through the public API.
//!
//! Each scenario builds an `AssessmentInput` the way a caller would (often
//! from JSON) and routes it through `GuidelineRouter`.

use serde_json::json;

use nodule_compass::domain::assessment::{
    GuidelineRouter, LungRadsCategory, LungRadsClassifier, NOT_APPLICABLE_CATEGORY,
    UNSUPPORTED_CATEGORY, WARNING_HIGHLY_SUSPICIOUS, WARNING_RISK_LEVEL_ASSUMED,
    WARNING_SOLID_COMPONENT_REQUIRED, WARNING_SOLID_EXCEEDS_DIAMETER,
};
use nodule_compass::domain::foundation::GuidelineId;
use nodule_compass::domain::nodule::{
    AssessmentInput, NoduleCharacteristics, PatientProfile, PriorStatus, RiskLevel,
    ScreeningExtension, SteppedManagementState,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn incidental(risk: RiskLevel, nodule: NoduleCharacteristics) -> AssessmentInput {
    AssessmentInput::new(PatientProfile::incidental(60.0, risk), nodule)
}

fn screening(nodule: NoduleCharacteristics, scan: ScreeningExtension) -> AssessmentInput {
    AssessmentInput::new(PatientProfile::screening(65.0), nodule).with_screening(scan)
}

fn from_json(value: serde_json::Value) -> AssessmentInput {
    serde_json::from_value(value).expect("valid assessment input")
}

// =============================================================================
// Incidental (Fleischner 2017) Scenarios
// =============================================================================

#[test]
fn small_solid_low_risk_needs_no_follow_up() {
    let result = GuidelineRouter::classify(&incidental(
        RiskLevel::Low,
        NoduleCharacteristics::solid(4.0),
    ));

    assert_eq!(result.guideline, GuidelineId::Fleischner2017);
    assert_eq!(result.category, "Solid <6mm (single, low risk)");
    assert_eq!(result.recommendation, "No routine follow-up");
    assert!(result.warnings.is_empty());
}

#[test]
fn measurement_is_rounded_before_thresholds() {
    // 5.6 rounds to 6, which is no longer "<6"
    let result = GuidelineRouter::classify(&incidental(
        RiskLevel::Low,
        NoduleCharacteristics::solid(5.6),
    ));
    assert_eq!(result.category, "Solid 6-8mm (single, low risk)");
    assert!(result.rationale.contains("measured 5.6mm"));

    let result = GuidelineRouter::classify(&incidental(
        RiskLevel::Low,
        NoduleCharacteristics::solid(5.4),
    ));
    assert_eq!(result.category, "Solid <6mm (single, low risk)");
}

#[test]
fn eight_millimetres_is_still_intermediate() {
    let result = GuidelineRouter::classify(&incidental(
        RiskLevel::High,
        NoduleCharacteristics::solid(8.0),
    ));
    assert_eq!(result.category, "Solid 6-8mm (single, high risk)");

    let result = GuidelineRouter::classify(&incidental(
        RiskLevel::High,
        NoduleCharacteristics::solid(9.0),
    ));
    assert_eq!(result.category, "Solid >8mm (single)");
}

#[test]
fn multiple_solid_nodules_use_multiplicity_branch() {
    let result = GuidelineRouter::classify(&incidental(
        RiskLevel::Low,
        NoduleCharacteristics::solid(7.0).multiple(),
    ));
    assert_eq!(result.category, "Solid ≥6mm (multiple, low risk)");
    assert_eq!(
        result.recommendation,
        "CT at 3-6 months; consider CT at 18-24 months"
    );
}

#[test]
fn ground_glass_from_json_request() {
    let input = from_json(json!({
        "patient": { "clinical_context": "incidental", "age": 55, "risk_level": "low" },
        "nodule": { "type": "ground-glass", "diameter_mm": 12 }
    }));

    let result = GuidelineRouter::classify(&input);
    assert_eq!(result.category, "Ground-glass ≥6mm");
    assert_eq!(
        result.recommendation,
        "CT at 6-12 months, then CT every 2 years until 5 years"
    );
}

#[test]
fn part_solid_with_large_solid_component_is_highly_suspicious() {
    let result = GuidelineRouter::classify(&incidental(
        RiskLevel::Low,
        NoduleCharacteristics::part_solid(15.0, Some(7.0)),
    ));
    assert_eq!(result.category, "Part-solid, solid ≥6mm");
    assert!(result.has_warning(WARNING_HIGHLY_SUSPICIOUS));
}

#[test]
fn part_solid_without_solid_component_asks_for_measurement() {
    let result = GuidelineRouter::classify(&incidental(
        RiskLevel::Low,
        NoduleCharacteristics::part_solid(10.0, None),
    ));
    assert_eq!(result.category, "Part-solid (solid component unknown)");
    assert!(result.has_warning(WARNING_SOLID_COMPONENT_REQUIRED));
}

#[test]
fn solid_component_larger_than_diameter_is_reported_not_rejected() {
    let result = GuidelineRouter::classify(&incidental(
        RiskLevel::Low,
        NoduleCharacteristics::part_solid(8.0, Some(9.0)),
    ));
    assert_ne!(result.category, NOT_APPLICABLE_CATEGORY);
    assert!(result.has_warning(WARNING_SOLID_EXCEEDS_DIAMETER));
}

#[test]
fn multiple_small_subsolid_high_risk_gets_extended_follow_up() {
    let result = GuidelineRouter::classify(&incidental(
        RiskLevel::High,
        NoduleCharacteristics::ground_glass(4.0).multiple(),
    ));
    assert_eq!(
        result.recommendation,
        "CT at 3-6 months; if stable consider CT at 2 and 4 years"
    );
}

#[test]
fn missing_risk_level_is_assumed_low_with_warning() {
    let input = from_json(json!({
        "patient": { "clinical_context": "incidental", "age": 60 },
        "nodule": { "type": "solid", "diameter_mm": 7 }
    }));

    let result = GuidelineRouter::classify(&input);
    assert_eq!(result.category, "Solid 6-8mm (single, low risk)");
    assert!(result.has_warning(WARNING_RISK_LEVEL_ASSUMED));
}

#[test]
fn excluded_patients_get_not_applicable() {
    let young = AssessmentInput::new(
        PatientProfile::incidental(30.0, RiskLevel::Low),
        NoduleCharacteristics::solid(7.0),
    );
    let result = GuidelineRouter::classify(&young);
    assert!(result.is_not_applicable());
    assert!(result.rationale.contains("≥35"));

    let immune = AssessmentInput::new(
        PatientProfile::incidental(60.0, RiskLevel::Low).with_immunocompromise(),
        NoduleCharacteristics::solid(7.0),
    );
    assert!(GuidelineRouter::classify(&immune).is_not_applicable());
}

#[test]
fn exclusion_precedes_nodule_type_checks() {
    let input = from_json(json!({
        "patient": {
            "clinical_context": "incidental",
            "age": 60,
            "risk_level": "low",
            "has_known_malignancy": true
        },
        "nodule": { "type": "calcified", "diameter_mm": 7 }
    }));

    let result = GuidelineRouter::classify(&input);
    assert_eq!(result.category, NOT_APPLICABLE_CATEGORY);
}

#[test]
fn unrecognised_nodule_type_yields_review_result() {
    let input = from_json(json!({
        "patient": { "clinical_context": "incidental", "age": 60, "risk_level": "low" },
        "nodule": { "type": "calcified", "diameter_mm": 7 }
    }));

    let result = GuidelineRouter::classify(&input);
    assert_eq!(result.category, UNSUPPORTED_CATEGORY);
    assert_eq!(result.recommendation, "Review input data");
}

// =============================================================================
// Screening (Lung-RADS v2022) Scenarios
// =============================================================================

#[test]
fn baseline_solid_size_bands() {
    let expected = [(5.0, "2"), (6.0, "3"), (7.9, "3"), (8.0, "4A"), (14.9, "4A"), (15.0, "4B")];
    for (diameter, category) in expected {
        let result = GuidelineRouter::classify(&screening(
            NoduleCharacteristics::solid(diameter),
            ScreeningExtension::baseline(),
        ));
        assert_eq!(result.category, category, "diameter {}", diameter);
        assert_eq!(result.guideline, GuidelineId::LungRads2022);
    }
}

#[test]
fn new_follow_up_nodule_uses_lower_bands() {
    let mut nodule = NoduleCharacteristics::solid(5.0);
    nodule.is_new = true;
    let result = GuidelineRouter::classify(&screening(nodule, ScreeningExtension::follow_up()));
    assert_eq!(result.category, "3");
    assert!(result.rationale.contains("New nodule"));
}

#[test]
fn growing_solid_nodule_escalates() {
    let result = GuidelineRouter::classify(&screening(
        NoduleCharacteristics::solid(9.0),
        ScreeningExtension::follow_up_with_prior(7.0, 12.0),
    ));
    assert_eq!(result.category, "4B");
    assert!(result.rationale.contains("Growth >1.5mm/12m detected"));

    let result = GuidelineRouter::classify(&screening(
        NoduleCharacteristics::solid(6.0),
        ScreeningExtension::follow_up_with_prior(4.0, 6.0),
    ));
    assert_eq!(result.category, "4A");
}

#[test]
fn slow_growth_over_long_interval_is_not_significant() {
    // 2mm over 24 months annualizes to 1mm
    let result = GuidelineRouter::classify(&screening(
        NoduleCharacteristics::solid(7.0),
        ScreeningExtension::follow_up_with_prior(5.0, 24.0),
    ));
    assert_eq!(result.category, "3");
    assert!(result.rationale.contains("No significant growth detected"));
}

#[test]
fn spiculated_category_3_upgrades_to_4x() {
    let result = GuidelineRouter::classify(&screening(
        NoduleCharacteristics::solid(7.0).with_spiculation(true),
        ScreeningExtension::baseline(),
    ));
    assert_eq!(result.category, "4X");
    assert!(result.rationale.contains("Spiculation: upgraded 3 to 4X"));
}

#[test]
fn stepped_management_overrides_computed_category() {
    let input = screening(
        NoduleCharacteristics::solid(7.0),
        ScreeningExtension::follow_up_with_prior(7.0, 12.0),
    )
    .with_stepped_management(SteppedManagementState::new(
        LungRadsCategory::Three,
        PriorStatus::Stable,
    ));

    let result = GuidelineRouter::classify(&input);
    assert_eq!(result.category, "2");
    assert_eq!(result.recommendation, "Continue annual LDCT");
    assert!(result.rationale.contains("Stepped management"));
}

#[test]
fn significant_finding_takes_priority() {
    let mut nodule = NoduleCharacteristics::solid(20.0);
    nodule.has_significant_finding = true;
    nodule.is_benign = true;
    let result = GuidelineRouter::classify(&screening(nodule, ScreeningExtension::baseline()));
    assert_eq!(result.category, "S");
}

#[test]
fn category_table_drives_result_fields() {
    let result = GuidelineRouter::classify(&screening(
        NoduleCharacteristics::solid(20.0),
        ScreeningExtension::baseline(),
    ));
    let guidance = LungRadsCategory::FourB.guidance();

    assert_eq!(result.recommendation, guidance.recommendation);
    assert_eq!(result.follow_up_interval, guidance.timing);
    assert_eq!(result.imaging_modality.as_deref(), Some(guidance.imaging_modality));
    assert_eq!(result.malignancy_risk.as_deref(), guidance.malignancy_probability);
}

#[test]
fn incidental_patient_passed_to_lung_rads_directly_is_not_applicable() {
    let result = LungRadsClassifier::classify(
        &PatientProfile::incidental(60.0, RiskLevel::Low),
        &NoduleCharacteristics::solid(7.0),
        &ScreeningExtension::baseline(),
        &SteppedManagementState::default(),
    );
    assert_eq!(result.guideline, GuidelineId::LungRads2022);
    assert!(result.is_not_applicable());
}

#[test]
fn routing_never_mixes_guidelines() {
    let incidental_input = incidental(RiskLevel::Low, NoduleCharacteristics::solid(7.0));
    let screening_input = screening(NoduleCharacteristics::solid(7.0), ScreeningExtension::baseline());

    assert_eq!(
        GuidelineRouter::classify(&incidental_input).guideline,
        GuidelineId::Fleischner2017
    );
    assert_eq!(
        GuidelineRouter::classify(&screening_input).guideline,
        GuidelineId::LungRads2022
    );
}
