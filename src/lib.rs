//! Nodule Compass - Pulmonary nodule follow-up decision support
//!
//! This crate classifies a single pulmonary nodule under the Fleischner 2017
//! guideline (incidental findings) or Lung-RADS v2022 (lung cancer screening)
//! and computes the Mayo, Brock and Herder malignancy risk models.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
