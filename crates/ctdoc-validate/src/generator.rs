use std::collections::BTreeMap;

use tracing::debug;

use ctdoc_model::{
    CustomRule, FieldDefinition, RuleDetails, RuleRecord, Severity, ValidationCategory,
    ValidationRule,
};

use crate::checks::{self, RuleDraft};
use crate::error::Result;

/// Generates validation rules from a CRF field catalogue.
///
/// Rule ids are `<PREFIX>-<NNNN>` where the number comes from one counter
/// shared by every category. The counter only moves forward, so ids are
/// unique for the lifetime of the generator but two rules of the same
/// category need not be consecutive.
#[derive(Debug, Default)]
pub struct RuleGenerator {
    fields: Vec<FieldDefinition>,
    rules: Vec<ValidationRule>,
    counter: u32,
}

impl RuleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append fields to the catalogue. Duplicates are kept.
    pub fn add_fields(&mut self, fields: impl IntoIterator<Item = FieldDefinition>) {
        self.fields.extend(fields);
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Every rule accumulated by [`generate_all_rules`](Self::generate_all_rules)
    /// and [`add_custom_rule`](Self::add_custom_rule).
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn generate_required_field_checks(&mut self) -> Result<Vec<ValidationRule>> {
        let drafts = checks::required::check(&self.fields);
        self.assign_ids(drafts)
    }

    pub fn generate_range_checks(&mut self) -> Result<Vec<ValidationRule>> {
        let drafts = checks::range::check(&self.fields);
        self.assign_ids(drafts)
    }

    pub fn generate_date_consistency_checks(&mut self) -> Result<Vec<ValidationRule>> {
        let drafts = checks::dates::check(&self.fields);
        self.assign_ids(drafts)
    }

    pub fn generate_logical_checks(&mut self) -> Result<Vec<ValidationRule>> {
        let drafts = checks::logical::check(&self.fields);
        self.assign_ids(drafts)
    }

    pub fn generate_cross_form_validations(&mut self) -> Result<Vec<ValidationRule>> {
        let drafts = checks::cross_form::check(&self.fields);
        self.assign_ids(drafts)
    }

    pub fn generate_protocol_deviation_checks(&mut self) -> Result<Vec<ValidationRule>> {
        self.assign_ids(checks::deviation::check())
    }

    /// Run every strategy in order and keep the results.
    ///
    /// Returns only the batch produced by this call; the accumulated
    /// collection is available through [`rules`](Self::rules).
    pub fn generate_all_rules(&mut self) -> Result<Vec<ValidationRule>> {
        let mut batch = self.generate_required_field_checks()?;
        batch.extend(self.generate_range_checks()?);
        batch.extend(self.generate_date_consistency_checks()?);
        batch.extend(self.generate_logical_checks()?);
        batch.extend(self.generate_cross_form_validations()?);
        batch.extend(self.generate_protocol_deviation_checks()?);
        debug!(
            generated = batch.len(),
            total = self.rules.len() + batch.len(),
            "generated validation rules"
        );
        self.rules.extend(batch.iter().cloned());
        Ok(batch)
    }

    /// Add a hand-written rule to the accumulated collection.
    ///
    /// Fails when the description or query text is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn add_custom_rule(
        &mut self,
        description: impl Into<String>,
        query_text: impl Into<String>,
        severity: Severity,
        category: ValidationCategory,
        form_name: Option<String>,
        field_name: Option<String>,
        details: RuleDetails,
    ) -> Result<&ValidationRule> {
        let mut draft = RuleDraft::new(category, severity, description.into(), query_text.into());
        draft.form_name = form_name;
        draft.field_name = field_name;
        draft.details = details;
        let rule_id = self.next_rule_id(category);
        let rule = draft.into_rule(rule_id)?;
        self.rules.push(rule);
        let index = self.rules.len() - 1;
        Ok(&self.rules[index])
    }

    /// [`add_custom_rule`](Self::add_custom_rule) from a catalogue entry.
    pub fn add_rule_spec(&mut self, spec: &CustomRule) -> Result<&ValidationRule> {
        self.add_custom_rule(
            spec.description.clone(),
            spec.query_text.clone(),
            spec.severity,
            spec.category,
            spec.form_name.clone(),
            spec.field_name.clone(),
            spec.details.clone(),
        )
    }

    /// Rule counts per category display name over the accumulated rules.
    ///
    /// Every category is present, with zero when it produced nothing.
    pub fn rules_summary(&self) -> BTreeMap<&'static str, usize> {
        let mut summary: BTreeMap<&'static str, usize> = ValidationCategory::ALL
            .iter()
            .map(|category| (category.display_name(), 0))
            .collect();
        for rule in &self.rules {
            *summary.entry(rule.category().display_name()).or_default() += 1;
        }
        summary
    }

    /// The accumulated rules as flat records, in insertion order.
    pub fn export_rules(&self) -> Vec<RuleRecord> {
        self.rules.iter().map(ValidationRule::to_record).collect()
    }

    fn next_rule_id(&mut self, category: ValidationCategory) -> String {
        self.counter += 1;
        format!("{}-{:04}", category.prefix(), self.counter)
    }

    fn assign_ids(&mut self, drafts: Vec<RuleDraft>) -> Result<Vec<ValidationRule>> {
        let mut rules = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let rule_id = self.next_rule_id(draft.category);
            rules.push(draft.into_rule(rule_id)?);
        }
        Ok(rules)
    }
}

/// Build a generator over `fields`, generate every rule and append the
/// caller's custom rules.
pub fn create_dvp_rules(
    fields: impl IntoIterator<Item = FieldDefinition>,
    custom_rules: &[CustomRule],
) -> Result<RuleGenerator> {
    let mut generator = RuleGenerator::new();
    generator.add_fields(fields);
    generator.generate_all_rules()?;
    for spec in custom_rules {
        generator.add_rule_spec(spec)?;
    }
    Ok(generator)
}
