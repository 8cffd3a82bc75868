#![deny(unsafe_code)]

//! Validation rule generation for Data Validation Plans.
//!
//! [`RuleGenerator`] turns a CRF field catalogue into an ordered list of
//! [`ValidationRule`]s. Each strategy lives in its own module under
//! `checks`; the generator owns the id counter and the accumulated rule
//! collection.

mod checks;
pub mod error;
pub mod export;
mod generator;

pub use ctdoc_model::ValidationRule;
pub use error::{Result, ValidateError};
pub use export::{write_rules_csv, write_rules_csv_to, write_rules_json};
pub use generator::{RuleGenerator, create_dvp_rules};
