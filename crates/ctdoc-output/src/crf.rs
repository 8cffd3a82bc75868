//! Case Report Form assembly.

use ctdoc_model::ProtocolInfo;
use ctdoc_standards::{CrfDomain, CrfField};

use crate::document::{Document, Table};
use crate::styles::DocumentStyles;

pub struct CrfAssembler<'a> {
    protocol: &'a ProtocolInfo,
    styles: DocumentStyles,
    version: String,
}

impl<'a> CrfAssembler<'a> {
    pub fn new(protocol: &'a ProtocolInfo, styles: DocumentStyles) -> Self {
        Self {
            protocol,
            styles,
            version: "1.0".to_string(),
        }
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// One section per domain, in the order given.
    pub fn build(&self, domains: &[CrfDomain]) -> Document {
        let mut doc = Document::new("Case Report Form (CRF)", self.styles.clone());
        doc.set_footer(Some(format!(
            "Protocol {} | Case Report Form v{}",
            self.protocol.display_number(),
            self.version
        )));

        doc.add_title("Case Report Form (CRF)");
        doc.add_details([
            ("Study Title", self.protocol.display_title()),
            ("Protocol Number", self.protocol.display_number()),
            ("Sponsor", self.protocol.display_sponsor()),
            ("CRF Version", self.version.as_str()),
        ]);

        for domain in domains {
            add_domain_section(&mut doc, domain);
        }
        doc
    }
}

fn add_domain_section(doc: &mut Document, domain: &CrfDomain) {
    doc.add_heading(1, &domain.name);
    if !domain.description.is_empty() {
        doc.add_paragraph(&domain.description);
    }

    let mut table = Table::new(["Field Name", "Type", "Required", "Value/Response"]);
    for field in &domain.fields {
        table.push_row([
            field_label(field),
            field_type(field),
            if field.required { "Yes" } else { "No" }.to_string(),
            response_cell(field),
        ]);
    }
    doc.add_table(table);

    doc.add_heading(2, format!("{} - Coding Instructions", domain.name));
    doc.add_bullets(domain.fields.iter().filter_map(|field| {
        field
            .coding_instruction
            .as_ref()
            .map(|instruction| format!("{}: {instruction}", field.label))
    }));
    doc.add_page_break();
}

fn field_label(field: &CrfField) -> String {
    match &field.unit {
        Some(unit) => format!("{} ({unit})", field.label),
        None => field.label.clone(),
    }
}

fn field_type(field: &CrfField) -> String {
    let label = field.data_type.label();
    if field.data_type.has_options() && !field.options.is_empty() {
        format!("{label} ({} options)", field.options.len())
    } else {
        label.to_string()
    }
}

/// Tick boxes for option fields, blank for free entry.
fn response_cell(field: &CrfField) -> String {
    if field.data_type.has_options() && !field.options.is_empty() {
        field
            .options
            .iter()
            .map(|option| format!("\u{25A1} {option}"))
            .collect::<Vec<_>>()
            .join("  ")
    } else {
        String::new()
    }
}
