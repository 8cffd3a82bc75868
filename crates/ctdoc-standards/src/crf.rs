//! Standard CRF domain catalogue and domain selection.

use serde::{Deserialize, Serialize};
use tracing::warn;

use ctdoc_model::{FieldDataType, FieldDefinition};

use crate::error::{Result, StandardsError};

const CRF_DOMAINS_TOML: &str = include_str!("../data/crf_domains.toml");

/// A CRF form section (demographics, vital signs, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrfDomain {
    #[serde(default)]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<CrfField>,
}

/// One field on a CRF form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrfField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub data_type: FieldDataType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coding_instruction: Option<String>,
}

impl CrfDomain {
    /// Build a caller-defined domain; the key is derived from the name.
    pub fn custom(name: impl Into<String>, description: impl Into<String>, fields: Vec<CrfField>) -> Self {
        let name = name.into();
        Self {
            key: domain_key(&name),
            name,
            description: description.into(),
            fields,
        }
    }

    /// A domain is usable when it has a name and at least one named field.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.fields.is_empty()
            && self.fields.iter().all(|field| !field.name.trim().is_empty())
    }

    /// Fields in rule-generator form, owned by this domain.
    pub fn field_definitions(&self) -> Vec<FieldDefinition> {
        self.fields
            .iter()
            .map(|field| field.to_definition(&self.name))
            .collect()
    }
}

impl CrfField {
    pub fn to_definition(&self, form_name: &str) -> FieldDefinition {
        let mut definition =
            FieldDefinition::new(&self.name, &self.label, form_name, self.data_type)
                .required(self.required)
                .valid_values(self.options.iter().cloned());
        definition.units = self.unit.clone();
        definition
    }
}

/// Result of resolving requested domain names against the catalogue.
#[derive(Debug, Clone, Default)]
pub struct DomainSelection {
    pub domains: Vec<CrfDomain>,
    /// Requested names that matched neither a standard nor a custom domain.
    pub unknown: Vec<String>,
}

/// Normalise a domain display name to its catalogue key.
///
/// `"Adverse Events"` becomes `"adverse_events"`.
pub fn domain_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Deserialize)]
struct DomainCatalogue {
    domains: Vec<CrfDomain>,
}

/// Load the seven standard CRF domains in catalogue order.
pub fn load_standard_crf_domains() -> Result<Vec<CrfDomain>> {
    let catalogue: DomainCatalogue =
        toml::from_str(CRF_DOMAINS_TOML).map_err(|source| StandardsError::Toml {
            name: "crf_domains.toml",
            source,
        })?;
    Ok(catalogue.domains)
}

/// Pick the domains a CRF should contain.
///
/// Requested names are matched by key against `standard` first, then
/// `custom`, in request order. An empty request selects every standard
/// domain. Custom domains that were not requested explicitly are appended
/// at the end, so caller-defined forms are never dropped.
pub fn resolve_domains(
    requested: &[String],
    standard: &[CrfDomain],
    custom: &[CrfDomain],
) -> DomainSelection {
    let mut selection = DomainSelection::default();
    let wanted: Vec<(String, &str)> = if requested.is_empty() {
        standard
            .iter()
            .map(|domain| (domain.key.clone(), domain.name.as_str()))
            .collect()
    } else {
        requested
            .iter()
            .map(|name| (domain_key(name), name.as_str()))
            .collect()
    };

    for (key, name) in &wanted {
        if selection.domains.iter().any(|domain| &domain.key == key) {
            continue;
        }
        match standard
            .iter()
            .chain(custom.iter())
            .find(|domain| &domain.key == key)
        {
            Some(domain) => selection.domains.push(domain.clone()),
            None => {
                warn!(domain = %name, "CRF domain not found, skipping");
                selection.unknown.push((*name).to_string());
            }
        }
    }

    for domain in custom {
        if !wanted.iter().any(|(key, _)| key == &domain.key) {
            selection.domains.push(domain.clone());
        }
    }
    selection
}
