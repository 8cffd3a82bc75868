use serde::{Deserialize, Serialize};

use crate::enums::FieldDataType;
use crate::error::{ModelError, Result};

/// One CRF field as seen by the rule generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub form_name: String,
    pub data_type: FieldDataType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub valid_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl FieldDefinition {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        form_name: impl Into<String>,
        data_type: FieldDataType,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            form_name: form_name.into(),
            data_type,
            required: false,
            min_value: None,
            max_value: None,
            valid_values: Vec::new(),
            units: None,
        }
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    #[must_use]
    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    #[must_use]
    pub fn valid_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Whether at least one numeric bound is set.
    pub fn has_bounds(&self) -> bool {
        self.min_value.is_some() || self.max_value.is_some()
    }

    /// Check the field invariants (`min <= max` when both bounds exist).
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_value, self.max_value)
            && min > max
        {
            return Err(ModelError::InvalidBounds {
                name: self.name.clone(),
                min,
                max,
            });
        }
        Ok(())
    }
}
