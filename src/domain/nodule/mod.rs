//! Nodule module - Immutable input records for one assessment call.
//!
//! # Components
//!
//! - `PatientProfile` - Context, age, exclusion flags, risk-model demographics
//! - `NoduleCharacteristics` - Type, size, and the flat set of morphology flags
//! - `ScreeningExtension` - Scan type and prior measurement (screening only)
//! - `SteppedManagementState` - Prior category/status (screening only)
//! - `AssessmentInput` - The four records bundled for one call

mod characteristics;
mod input;
mod patient;
mod screening;

pub use characteristics::{
    AirwayLocation, AtypicalCystCategory, InflammatoryCategory, NoduleCharacteristics,
    NoduleType, PetUptake,
};
pub use input::AssessmentInput;
pub use patient::{ExtrathoracicCancerHistory, PatientProfile, RiskLevel, Sex, SmokingStatus};
pub use screening::{PriorStatus, ScanType, ScreeningExtension, SteppedManagementState};
