use serde_json::Value;

use ctdoc_model::{FieldDefinition, Severity, ValidationCategory};

use super::RuleDraft;

/// A single critical rule when a subject identifier appears more than once.
///
/// Only subject-id-like fields are considered; other repeated concepts are
/// not detected.
pub(crate) fn check(fields: &[FieldDefinition]) -> Vec<RuleDraft> {
    let subject_fields: Vec<&FieldDefinition> = fields
        .iter()
        .filter(|field| {
            let name = field.name.to_lowercase();
            name.contains("subject") && name.contains("id")
        })
        .collect();
    if subject_fields.len() <= 1 {
        return Vec::new();
    }

    let mut forms: Vec<&str> = Vec::new();
    for field in &subject_fields {
        if !forms.contains(&field.form_name.as_str()) {
            forms.push(&field.form_name);
        }
    }

    vec![
        RuleDraft::new(
            ValidationCategory::CrossForm,
            Severity::Critical,
            format!(
                "Check that Subject ID is consistent across all forms: {}",
                forms.join(", ")
            ),
            "Please verify the Subject ID. It appears to be inconsistent across forms.".to_string(),
        )
        .detail(
            "forms",
            Value::Array(
                forms
                    .iter()
                    .map(|form| Value::String((*form).to_string()))
                    .collect(),
            ),
        ),
    ]
}
