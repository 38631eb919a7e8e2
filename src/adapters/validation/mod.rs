//! Validation Adapters - Input validation implementations.
//!
//! Contains adapters for checking assessment requests against the input schema.

mod schema_input_validator;

pub use schema_input_validator::{
    SchemaInputValidator, MAX_AGE_YEARS, MESSAGE_AGE_MAXIMUM, MESSAGE_AGE_POSITIVE,
    MESSAGE_DIAMETER_RANGE,
    MESSAGE_FOLLOW_UP_PRIOR_REQUIRED, MESSAGE_NODULE_COUNT, MESSAGE_PRIOR_DIAMETER_NEGATIVE,
    MESSAGE_PRIOR_INTERVAL_NEGATIVE, MESSAGE_RISK_LEVEL_REQUIRED, MESSAGE_SCAN_TYPE_REQUIRED,
    MESSAGE_SOLID_COMPONENT_RANGE, MESSAGE_STEPPED_STATE_PAIRED,
};
