//! Data Validation Plan assembly.

use std::collections::BTreeMap;

use chrono::Local;

use ctdoc_model::{ProtocolInfo, Severity, ValidationRule};

use crate::document::{Document, Table};
use crate::styles::DocumentStyles;

pub struct DvpAssembler<'a> {
    protocol: &'a ProtocolInfo,
    styles: DocumentStyles,
    version: String,
    date: String,
}

impl<'a> DvpAssembler<'a> {
    pub fn new(protocol: &'a ProtocolInfo, styles: DocumentStyles) -> Self {
        Self {
            protocol,
            styles,
            version: "1.0".to_string(),
            date: Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn build(&self, rules: &[ValidationRule]) -> Document {
        let mut doc = Document::new("Data Validation Plan", self.styles.clone());
        doc.set_footer(Some(format!(
            "Protocol {} | Data Validation Plan v{}",
            self.protocol.display_number(),
            self.version
        )));

        self.add_title_page(&mut doc);
        self.add_introduction(&mut doc);
        add_rules_section(&mut doc, rules);
        add_appendix(&mut doc);
        doc
    }

    fn add_title_page(&self, doc: &mut Document) {
        doc.add_title("Data Validation Plan");
        doc.add_details([
            ("Protocol Number", self.protocol.display_number()),
            ("Protocol Title", self.protocol.display_title()),
            ("Sponsor", self.protocol.display_sponsor()),
            ("Indication", self.protocol.display_indication()),
            ("Phase", self.protocol.display_phase()),
            ("DVP Version", self.version.as_str()),
            ("Date", self.date.as_str()),
        ]);
        doc.add_page_break();
    }

    fn add_introduction(&self, doc: &mut Document) {
        doc.add_heading(1, "1. Introduction");
        doc.add_paragraph(format!(
            "This Data Validation Plan (DVP) describes the validation checks to be implemented \
             for the clinical trial \"{}\" (Protocol {}).",
            self.protocol.display_title(),
            self.protocol.display_number()
        ));
        doc.add_paragraph(
            "The purpose of this DVP is to ensure data quality and integrity throughout the \
             study by defining:",
        );
        doc.add_bullets([
            "Required field validations",
            "Range checks for numeric and date fields",
            "Logical consistency checks",
            "Cross-form validations",
            "Protocol deviation checks",
        ]);
        doc.add_paragraph(
            "All validation rules defined in this document will be implemented in the \
             Electronic Data Capture (EDC) system and will generate queries when triggered.",
        );
    }
}

fn add_rules_section(doc: &mut Document, rules: &[ValidationRule]) {
    doc.add_heading(1, "2. Validation Rules");
    if rules.is_empty() {
        doc.add_paragraph("No validation rules defined.");
        return;
    }

    // grouped by display name, alphabetical
    let mut by_type: BTreeMap<&str, Vec<&ValidationRule>> = BTreeMap::new();
    for rule in rules {
        by_type
            .entry(rule.category().display_name())
            .or_default()
            .push(rule);
    }

    doc.add_heading(2, "2.1 Summary");
    let mut summary = Table::new(["Validation Type", "Count"]);
    for (type_name, group) in &by_type {
        summary.push_row([(*type_name).to_string(), group.len().to_string()]);
    }
    doc.add_table(summary);

    doc.add_heading(2, "2.2 Detailed Validation Rules");
    for (index, (type_name, group)) in by_type.iter().enumerate() {
        doc.add_heading(3, format!("2.2.{} {type_name}", index + 1));
        let mut table = Table::new([
            "Rule ID",
            "Form",
            "Field",
            "Description",
            "Severity",
            "Query Text",
        ]);
        for rule in group {
            table.push_row([
                rule.rule_id(),
                rule.form_name().unwrap_or("N/A"),
                rule.field_name().unwrap_or("N/A"),
                rule.description(),
                rule.severity().as_str(),
                rule.query_text(),
            ]);
        }
        doc.add_table(table);
    }
}

fn add_appendix(doc: &mut Document) {
    doc.add_heading(1, "3. Appendix");
    doc.add_heading(2, "3.1 Severity Definitions");
    let mut table = Table::new(["Severity", "Definition"]);
    for severity in Severity::ALL {
        table.push_row([severity.as_str(), severity.definition()]);
    }
    doc.add_table(table);
}
