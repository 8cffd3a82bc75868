//! Optional `ctdoc.toml` configuration.
//!
//! ```toml
//! [workflow]
//! generate = ["crf", "dvp"]
//! backup = true
//! max_pages = 40
//! dmp_enabled = false
//! batch_output_dir = "batch_output"
//!
//! [style]
//! profile = "fda"
//!
//! [system]
//! edc_system_name = "Medidata Rave"
//! support_email = "support@sponsor.example"
//! support_phone = "+1-555-0100"
//! ```
//!
//! Command-line flags take precedence over every value here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::Deserialize;
use tracing::{info, warn};

use ctdoc_model::DocumentKind;
use ctdoc_output::{StyleProfile, SystemInfo};

pub const DEFAULT_CONFIG_FILE: &str = "ctdoc.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub workflow: WorkflowSection,
    pub style: StyleSection,
    pub system: SystemInfo,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorkflowSection {
    /// Document kinds by name; empty means all.
    pub generate: Vec<String>,
    pub backup: bool,
    pub max_pages: Option<usize>,
    pub dmp_enabled: bool,
    pub batch_output_dir: Option<PathBuf>,
}

impl Default for WorkflowSection {
    fn default() -> Self {
        Self {
            generate: Vec::new(),
            backup: true,
            max_pages: None,
            dmp_enabled: false,
            batch_output_dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleSection {
    pub profile: StyleProfile,
}

impl AppConfig {
    /// Requested kinds from `[workflow] generate`.
    pub fn document_kinds(&self) -> Result<Vec<DocumentKind>> {
        resolve_kinds(&self.workflow.generate)
    }
}

/// Load configuration from `path`, or from `ctdoc.toml` in the working
/// directory when no path is given.
///
/// A missing or unreadable file and a file that fails to parse all fall
/// back to defaults.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                info!(path = %path.display(), "loaded configuration");
                config
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to parse configuration, using defaults");
                AppConfig::default()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no configuration file, using defaults");
            AppConfig::default()
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to read configuration, using defaults");
            AppConfig::default()
        }
    }
}

/// Turn kind names into a deduplicated list in execution order.
///
/// An empty list or the name `all` selects every kind.
pub fn resolve_kinds<S: AsRef<str>>(names: &[S]) -> Result<Vec<DocumentKind>> {
    let mut requested = Vec::new();
    for name in names {
        let name = name.as_ref();
        if name.trim().eq_ignore_ascii_case("all") {
            return Ok(DocumentKind::ALL.to_vec());
        }
        match name.parse::<DocumentKind>() {
            Ok(kind) => requested.push(kind),
            Err(message) => bail!(message),
        }
    }
    if requested.is_empty() {
        return Ok(DocumentKind::ALL.to_vec());
    }
    Ok(DocumentKind::ALL
        .into_iter()
        .filter(|kind| requested.contains(kind))
        .collect())
}
