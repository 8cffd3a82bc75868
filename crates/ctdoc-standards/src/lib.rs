#![deny(unsafe_code)]

//! Standard catalogues shipped with the document generators.
//!
//! The catalogues are embedded TOML files so the binaries carry no runtime
//! data dependency.

pub mod crf;
pub mod error;
pub mod fields;

pub use crate::crf::{
    CrfDomain, CrfField, DomainSelection, domain_key, load_standard_crf_domains, resolve_domains,
};
pub use crate::error::{Result, StandardsError};
pub use crate::fields::load_default_dvp_fields;
