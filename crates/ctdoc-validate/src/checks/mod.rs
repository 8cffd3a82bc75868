//! Rule generation strategies.
//!
//! Each strategy inspects the field catalogue and returns rule drafts in
//! field order. Drafts carry everything but the id, which the generator
//! assigns from its shared counter.

pub(crate) mod cross_form;
pub(crate) mod dates;
pub(crate) mod deviation;
pub(crate) mod logical;
pub(crate) mod range;
pub(crate) mod required;

use ctdoc_model::{
    FieldDefinition, ModelError, RuleDetails, Severity, ValidationCategory, ValidationRule,
};

/// A rule waiting for its id.
#[derive(Debug, Clone)]
pub(crate) struct RuleDraft {
    pub category: ValidationCategory,
    pub severity: Severity,
    pub description: String,
    pub query_text: String,
    pub form_name: Option<String>,
    pub field_name: Option<String>,
    pub details: RuleDetails,
}

impl RuleDraft {
    pub fn new(
        category: ValidationCategory,
        severity: Severity,
        description: String,
        query_text: String,
    ) -> Self {
        Self {
            category,
            severity,
            description,
            query_text,
            form_name: None,
            field_name: None,
            details: RuleDetails::new(),
        }
    }

    /// Attach the owning form and field.
    pub fn for_field(mut self, field: &FieldDefinition) -> Self {
        self.form_name = Some(field.form_name.clone());
        self.field_name = Some(field.name.clone());
        self
    }

    pub fn detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn into_rule(self, rule_id: String) -> Result<ValidationRule, ModelError> {
        Ok(ValidationRule::new(
            rule_id,
            self.description,
            self.severity,
            self.query_text,
            self.category,
        )?
        .with_form(self.form_name)
        .with_field(self.field_name)
        .with_details(self.details))
    }
}
