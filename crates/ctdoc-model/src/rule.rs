use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{Severity, ValidationCategory};
use crate::error::{ModelError, Result};

/// Free-form, category-specific attributes of a rule.
pub type RuleDetails = BTreeMap<String, Value>;

/// A generated data validation check.
///
/// Rules can only be built through [`ValidationRule::new`], which rejects
/// empty text and ids that do not carry their category's prefix. Once
/// built a rule is never edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRule {
    rule_id: String,
    description: String,
    severity: Severity,
    query_text: String,
    category: ValidationCategory,
    form_name: Option<String>,
    field_name: Option<String>,
    details: RuleDetails,
}

impl ValidationRule {
    pub fn new(
        rule_id: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        query_text: impl Into<String>,
        category: ValidationCategory,
    ) -> Result<Self> {
        let rule_id = rule_id.into();
        let description = description.into();
        let query_text = query_text.into();
        if rule_id.trim().is_empty() {
            return Err(ModelError::EmptyRuleField { field: "Rule ID" });
        }
        if description.trim().is_empty() {
            return Err(ModelError::EmptyRuleField {
                field: "Description",
            });
        }
        if query_text.trim().is_empty() {
            return Err(ModelError::EmptyRuleField {
                field: "Query text",
            });
        }
        if !rule_id.starts_with(&format!("{}-", category.prefix())) {
            return Err(ModelError::PrefixMismatch {
                rule_id,
                expected: category.prefix(),
            });
        }
        Ok(Self {
            rule_id,
            description,
            severity,
            query_text,
            category,
            form_name: None,
            field_name: None,
            details: RuleDetails::new(),
        })
    }

    #[must_use]
    pub fn with_form(mut self, form_name: Option<String>) -> Self {
        self.form_name = form_name;
        self
    }

    #[must_use]
    pub fn with_field(mut self, field_name: Option<String>) -> Self {
        self.field_name = field_name;
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: RuleDetails) -> Self {
        self.details = details;
        self
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn category(&self) -> ValidationCategory {
        self.category
    }

    pub fn form_name(&self) -> Option<&str> {
        self.form_name.as_deref()
    }

    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    pub fn details(&self) -> &RuleDetails {
        &self.details
    }

    /// Flatten into the export record.
    pub fn to_record(&self) -> RuleRecord {
        RuleRecord {
            rule_id: self.rule_id.clone(),
            description: self.description.clone(),
            severity: self.severity.as_str().to_string(),
            query_text: self.query_text.clone(),
            validation_type: self.category.display_name().to_string(),
            form_name: self.form_name.clone(),
            field_name: self.field_name.clone(),
            details: self.details.clone(),
        }
    }
}

/// Flat, string-typed view of a rule for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub rule_id: String,
    pub description: String,
    pub severity: String,
    pub query_text: String,
    pub validation_type: String,
    pub form_name: Option<String>,
    pub field_name: Option<String>,
    pub details: RuleDetails,
}

/// A caller-authored rule, as read from a field catalogue file.
///
/// The generator assigns the id when the rule is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRule {
    pub description: String,
    pub query_text: String,
    #[serde(default = "default_custom_severity")]
    pub severity: Severity,
    #[serde(default = "default_custom_category")]
    pub category: ValidationCategory,
    #[serde(default)]
    pub form_name: Option<String>,
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub details: RuleDetails,
}

fn default_custom_severity() -> Severity {
    Severity::Major
}

fn default_custom_category() -> ValidationCategory {
    ValidationCategory::Custom
}
