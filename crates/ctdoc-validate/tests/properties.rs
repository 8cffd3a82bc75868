//! Property tests for rule generation invariants.

use std::collections::HashSet;

use ctdoc_model::{FieldDataType, FieldDefinition};
use ctdoc_validate::RuleGenerator;
use proptest::prelude::*;

fn arb_data_type() -> impl Strategy<Value = FieldDataType> {
    prop_oneof![
        Just(FieldDataType::Text),
        Just(FieldDataType::Numeric),
        Just(FieldDataType::Date),
        Just(FieldDataType::Dropdown),
        Just(FieldDataType::Checkbox),
    ]
}

fn arb_field() -> impl Strategy<Value = FieldDefinition> {
    (
        prop::sample::select(vec![
            "subject_id",
            "age",
            "visit_date",
            "ae_start_date",
            "ae_occurred",
            "weight",
            "inform_consent_date",
        ]),
        prop::sample::select(vec!["Demographics", "Vital Signs", "Adverse Events"]),
        arb_data_type(),
        any::<bool>(),
        prop::option::of(0i32..100),
        prop::option::of(100i32..300),
        any::<bool>(),
    )
        .prop_map(|(name, form, data_type, required, min, max, yes_no)| {
            let mut field = FieldDefinition::new(name, name.to_uppercase(), form, data_type)
                .required(required)
                .bounds(min.map(f64::from), max.map(f64::from));
            if yes_no {
                field = field.valid_values(["Yes", "No"]);
            }
            field
        })
}

proptest! {
    #[test]
    fn required_rules_match_required_fields(fields in prop::collection::vec(arb_field(), 0..20)) {
        let expected = fields.iter().filter(|field| field.required).count();
        let mut generator = RuleGenerator::new();
        generator.add_fields(fields);
        let rules = generator.generate_required_field_checks().unwrap();
        prop_assert_eq!(rules.len(), expected);
    }

    #[test]
    fn ids_are_unique_and_prefixed(fields in prop::collection::vec(arb_field(), 0..20), rounds in 1usize..4) {
        let mut generator = RuleGenerator::new();
        generator.add_fields(fields);
        for _ in 0..rounds {
            generator.generate_all_rules().unwrap();
        }
        let mut seen = HashSet::new();
        for rule in generator.rules() {
            prop_assert!(seen.insert(rule.rule_id().to_string()));
            let prefix = format!("{}-", rule.category().prefix());
            prop_assert!(rule.rule_id().starts_with(&prefix));
        }
    }

    #[test]
    fn summary_counts_sum_to_total(fields in prop::collection::vec(arb_field(), 0..20)) {
        let mut generator = RuleGenerator::new();
        generator.add_fields(fields);
        generator.generate_all_rules().unwrap();
        let total: usize = generator.rules_summary().values().sum();
        prop_assert_eq!(total, generator.rules().len());
    }

    #[test]
    fn bounded_range_rules_quote_both_bounds(min in 0i32..100, max in 100i32..300) {
        let mut generator = RuleGenerator::new();
        generator.add_fields([FieldDefinition::new("hr", "Heart Rate", "Vital Signs", FieldDataType::Numeric)
            .bounds(Some(f64::from(min)), Some(f64::from(max)))]);
        let rules = generator.generate_range_checks().unwrap();
        prop_assert_eq!(rules.len(), 1);
        prop_assert!(rules[0].description().contains(&min.to_string()));
        prop_assert!(rules[0].description().contains(&max.to_string()));
    }
}
