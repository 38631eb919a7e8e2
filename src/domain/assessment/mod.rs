//! Assessment module - Guideline classification of a single nodule.
//!
//! # Components
//!
//! - `EligibilityFilter` - Decides whether a guideline applies to the patient
//! - `GrowthEvaluator` - Clinically significant growth between scans
//! - `FleischnerClassifier` - Incidental nodules (Fleischner 2017)
//! - `LungRadsClassifier` - Screening nodules (Lung-RADS v2022)
//! - `LungRadsCategory` - Category codes and their management table
//! - `GuidelineRouter` - Picks the classifier for the clinical context
//!
//! # Design
//!
//! All classifiers are stateless and pure: same inputs, same result. They
//! never fail; unusual input is reported through `AssessmentResult::warnings`.

mod eligibility;
mod fleischner;
mod growth;
mod lung_rads;
mod lung_rads_category;
mod result;
mod router;

pub use eligibility::{Applicability, EligibilityFilter, ExclusionReason, FLEISCHNER_MIN_AGE_YEARS};
pub use fleischner::{
    FleischnerClassifier, FLEISCHNER_INTERMEDIATE_MAX_MM, FLEISCHNER_PERIFISSURAL_MAX_MM,
    FLEISCHNER_SMALL_NODULE_MM, FLEISCHNER_SUSPICIOUS_SOLID_COMPONENT_MM,
    WARNING_RISK_LEVEL_ASSUMED,
};
pub use growth::{GrowthEvaluator, ANNUALIZATION_WINDOW_MONTHS, GROWTH_THRESHOLD_MM_PER_12_MONTHS};
pub use lung_rads::{
    LungRadsClassifier, BASELINE_SOLID_BANDS_MM, GROUND_GLASS_CATEGORY_3_MM,
    GROWTH_ESCALATION_MM, LUNG_RADS_BENIGN_MORPHOLOGY_MAX_MM, NEW_SOLID_BANDS_MM,
    PART_SOLID_CATEGORY_4A_MM, PART_SOLID_COMPONENT_4B_MM, WARNING_AIRWAY_LOCATION_MISSING,
    WARNING_CYST_CATEGORY_MISSING, WARNING_INFLAMMATORY_CATEGORY_MISSING,
};
pub use lung_rads_category::{CategoryGuidance, LungRadsCategory};
pub use result::{
    AssessmentResult, NOT_APPLICABLE_CATEGORY, UNSUPPORTED_CATEGORY, WARNING_HIGHLY_SUSPICIOUS,
    WARNING_SOLID_COMPONENT_REQUIRED, WARNING_SOLID_EXCEEDS_DIAMETER, WARNING_UNKNOWN_NODULE_TYPE,
};
pub use router::GuidelineRouter;
