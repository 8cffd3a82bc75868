//! Field catalogues supplied by the caller for the validation plan and
//! the CRF.
//!
//! A catalogue is a JSON (or `.toml`) document with three optional
//! sections:
//!
//! ```json
//! {
//!   "fields": [{"name": "age", "label": "Age", "form_name": "Demographics",
//!               "data_type": "numeric", "required": true,
//!               "min_value": 18, "max_value": 65}],
//!   "custom_rules": [{"description": "...", "query_text": "..."}],
//!   "custom_domains": [{"name": "Pharmacokinetics", "fields": [...]}]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use ctdoc_model::{CustomRule, FieldDefinition};
use ctdoc_standards::{CrfDomain, domain_key};

use crate::error::{IngestError, Result};
use crate::parser::ensure_exists;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldCatalogue {
    pub fields: Vec<FieldDefinition>,
    pub custom_rules: Vec<CustomRule>,
    pub custom_domains: Vec<CrfDomain>,
}

impl FieldCatalogue {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.custom_rules.is_empty() && self.custom_domains.is_empty()
    }
}

/// Load and check a field catalogue.
///
/// Fields must have consistent bounds, custom rules need a description and
/// query text, and custom domains need a name and at least one field.
/// Missing domain keys are derived from the domain name.
pub fn load_field_catalogue(path: &Path) -> Result<FieldCatalogue> {
    ensure_exists(path)?;
    let content = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let mut catalogue: FieldCatalogue = if is_toml {
        toml::from_str(&content).map_err(|source| IngestError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&content).map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };

    let invalid = |message: String| IngestError::InvalidCatalogue {
        path: path.to_path_buf(),
        message,
    };

    for field in &catalogue.fields {
        field
            .validate()
            .map_err(|err| invalid(format!("field '{}': {err}", field.name)))?;
    }
    for (index, rule) in catalogue.custom_rules.iter().enumerate() {
        if rule.description.trim().is_empty() || rule.query_text.trim().is_empty() {
            return Err(invalid(format!(
                "custom rule #{} needs a description and query text",
                index + 1
            )));
        }
    }
    for domain in &mut catalogue.custom_domains {
        if !domain.is_valid() {
            return Err(invalid(format!(
                "custom domain '{}' needs a name and at least one named field",
                domain.name
            )));
        }
        if domain.key.trim().is_empty() {
            domain.key = domain_key(&domain.name);
        }
    }

    info!(
        path = %path.display(),
        fields = catalogue.fields.len(),
        custom_rules = catalogue.custom_rules.len(),
        custom_domains = catalogue.custom_domains.len(),
        "loaded field catalogue"
    );
    Ok(catalogue)
}
