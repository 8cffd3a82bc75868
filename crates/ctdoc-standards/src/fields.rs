use serde::Deserialize;

use ctdoc_model::FieldDefinition;

use crate::error::{Result, StandardsError};

const DVP_FIELDS_TOML: &str = include_str!("../data/dvp_fields.toml");

#[derive(Deserialize)]
struct FieldCatalogue {
    fields: Vec<FieldDefinition>,
}

/// Default field catalogue for Data Validation Plans.
///
/// Every field is checked against the model invariants on load.
pub fn load_default_dvp_fields() -> Result<Vec<FieldDefinition>> {
    let catalogue: FieldCatalogue =
        toml::from_str(DVP_FIELDS_TOML).map_err(|source| StandardsError::Toml {
            name: "dvp_fields.toml",
            source,
        })?;
    for field in &catalogue.fields {
        field
            .validate()
            .map_err(|source| StandardsError::InvalidField {
                name: "dvp_fields.toml",
                source,
            })?;
    }
    Ok(catalogue.fields)
}
