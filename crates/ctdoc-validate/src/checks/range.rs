use serde_json::Value;

use ctdoc_model::{FieldDataType, FieldDefinition, Severity, ValidationCategory};

use super::RuleDraft;

/// One major rule per numeric field with at least one bound.
pub(crate) fn check(fields: &[FieldDefinition]) -> Vec<RuleDraft> {
    fields
        .iter()
        .filter(|field| field.data_type == FieldDataType::Numeric && field.has_bounds())
        .filter_map(|field| {
            let range = describe_range(field.min_value, field.max_value)?;
            let units = field
                .units
                .as_deref()
                .map(|units| format!(" {units}"))
                .unwrap_or_default();
            let draft = RuleDraft::new(
                ValidationCategory::RangeCheck,
                Severity::Major,
                format!(
                    "Check that {} ({}) is {range}{units}",
                    field.label, field.name
                ),
                format!(
                    "Please verify {}. The value is outside the expected range ({range}{units}).",
                    field.label
                ),
            )
            .for_field(field)
            .detail("min_value", bound_value(field.min_value))
            .detail("max_value", bound_value(field.max_value))
            .detail(
                "units",
                field.units.clone().map_or(Value::Null, Value::String),
            );
            Some(draft)
        })
        .collect()
}

/// Range phrase for the bounds present, `None` when there are none.
pub(crate) fn describe_range(min: Option<f64>, max: Option<f64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) => Some(format!("between {min} and {max}")),
        (Some(min), None) => Some(format!("greater than or equal to {min}")),
        (None, Some(max)) => Some(format!("less than or equal to {max}")),
        (None, None) => None,
    }
}

fn bound_value(bound: Option<f64>) -> Value {
    bound
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_phrase_formats_bounds_as_given() {
        assert_eq!(
            describe_range(Some(40.0), Some(200.0)).as_deref(),
            Some("between 40 and 200")
        );
        assert_eq!(
            describe_range(Some(35.5), None).as_deref(),
            Some("greater than or equal to 35.5")
        );
        assert_eq!(
            describe_range(None, Some(10.0)).as_deref(),
            Some("less than or equal to 10")
        );
        assert!(describe_range(None, None).is_none());
    }
}
