//! CLI library components for clinical document automation.

pub mod config;
pub mod logging;
