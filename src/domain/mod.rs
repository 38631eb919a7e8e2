//! Domain layer containing clinical logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `nodule` - Patient and nodule input records
//! - `assessment` - Guideline classifiers (Fleischner 2017, Lung-RADS v2022)
//! - `predictive` - Malignancy risk models (Mayo, Brock, Herder)
//! - `clinical_cases` - Reference cases for expert review and their runner

pub mod assessment;
pub mod clinical_cases;
pub mod foundation;
pub mod nodule;
pub mod predictive;
