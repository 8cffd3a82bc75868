//! EDC/ePRO user guide assembly.
//!
//! The guide walks site users through access, navigation, data entry for
//! every CRF form, query handling and reporting. Places where a screenshot
//! of the live system belongs are marked with a placeholder box and
//! collected so they can be handed to whoever captures them.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use ctdoc_model::{FieldDataType, ProtocolInfo};
use ctdoc_standards::{CrfDomain, CrfField};

use crate::document::{Block, Document, Table};
use crate::error::{OutputError, Result};
use crate::styles::DocumentStyles;

/// EDC system and support contacts named in the guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    pub edc_system_name: String,
    pub support_email: String,
    pub support_phone: String,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            edc_system_name: "EDC/ePRO System".to_string(),
            support_email: "helpdesk@example.com".to_string(),
            support_phone: "+1-800-XXX-XXXX".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenshotPlaceholder {
    pub section: String,
    pub step: String,
    pub description: String,
    /// Inches.
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuideField {
    pub name: String,
    pub label: String,
    pub data_type: FieldDataType,
    pub required: bool,
    pub validation: Option<String>,
}

impl GuideField {
    pub fn from_crf_field(field: &CrfField) -> Self {
        let mut notes = Vec::new();
        if !field.options.is_empty() {
            notes.push(field.options.join("/"));
        }
        if let Some(unit) = &field.unit {
            notes.push(format!("Unit: {unit}"));
        }
        Self {
            name: field.name.clone(),
            label: field.label.clone(),
            data_type: field.data_type,
            required: field.required,
            validation: (!notes.is_empty()).then(|| notes.join("; ")),
        }
    }

    /// Entry instruction for the field, e.g. `Enter numeric value. Validation: Unit: kg.`
    pub fn instruction(&self) -> String {
        let base = match self.data_type {
            FieldDataType::Text => "Enter text value",
            FieldDataType::Numeric => "Enter numeric value",
            FieldDataType::Date => "Enter date in YYYY-MM-DD format",
            FieldDataType::Dropdown => "Select one option from dropdown",
            FieldDataType::Checkbox => "Select all applicable options",
        };
        match &self.validation {
            Some(validation) => format!("{base}. Validation: {validation}."),
            None => format!("{base}."),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuideForm {
    pub name: String,
    pub title: String,
    pub visit: String,
    pub fields: Vec<GuideField>,
}

impl GuideForm {
    /// Demographics and medical history are collected at screening; every
    /// other form at all visits.
    pub fn from_domain(domain: &CrfDomain) -> Self {
        let visit = match domain.key.as_str() {
            "demographics" | "medical_history" => "Screening",
            _ => "All Visits",
        };
        Self {
            name: domain.key.clone(),
            title: domain.name.clone(),
            visit: visit.to_string(),
            fields: domain.fields.iter().map(GuideField::from_crf_field).collect(),
        }
    }
}

/// Assembled guide plus the screenshots it asks for.
#[derive(Debug, Clone)]
pub struct UserGuide {
    pub document: Document,
    pub screenshots: Vec<ScreenshotPlaceholder>,
}

pub struct UserGuideAssembler<'a> {
    protocol: &'a ProtocolInfo,
    styles: DocumentStyles,
    system: SystemInfo,
    version: String,
    date: String,
}

type Steps<'s> = &'s [(&'s str, &'s str)];

impl<'a> UserGuideAssembler<'a> {
    pub fn new(protocol: &'a ProtocolInfo, styles: DocumentStyles, system: SystemInfo) -> Self {
        Self {
            protocol,
            styles,
            system,
            version: "1.0".to_string(),
            date: Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn build(&self, forms: &[GuideForm]) -> UserGuide {
        let mut builder = GuideBuilder {
            doc: Document::new(
                format!("{} User Guide", self.system.edc_system_name),
                self.styles.clone(),
            ),
            screenshots: Vec::new(),
        };
        builder.doc.set_footer(Some(format!(
            "Protocol {} | User Guide v{}",
            self.protocol.display_number(),
            self.version
        )));

        self.cover_page(&mut builder);
        self.introduction(&mut builder);
        system_access(&mut builder);
        navigation(&mut builder);
        data_entry(&mut builder, forms);
        query_management(&mut builder);
        report_generation(&mut builder);
        self.appendix(&mut builder);

        UserGuide {
            document: builder.doc,
            screenshots: builder.screenshots,
        }
    }

    fn cover_page(&self, b: &mut GuideBuilder) {
        b.doc.add_title(format!("{}\nUser Guide", self.system.edc_system_name));
        b.doc.add_centered(format!(
            "Protocol: {}\n{}",
            self.protocol.display_number(),
            self.protocol.display_title()
        ));
        b.doc.add_centered(format!(
            "Version: {}\nDate: {}\nSponsor: {}",
            self.version,
            self.date,
            self.protocol.display_sponsor()
        ));
        b.doc.add_page_break();
    }

    fn introduction(&self, b: &mut GuideBuilder) {
        b.doc.add_heading(1, "1. Introduction");
        b.doc.add_paragraph(format!(
            "This user guide provides comprehensive instructions for using the {} for the {} \
             study. The guide covers all aspects of data entry, navigation, and system usage.",
            self.system.edc_system_name,
            self.protocol.display_number()
        ));
        b.doc.add_heading(2, "1.1 Purpose");
        b.doc.add_paragraph("The purpose of this guide is to:");
        b.doc.add_bullets([
            "Provide step-by-step instructions for accessing and using the system",
            "Explain how to enter and manage clinical data",
            "Guide users through the query management process",
            "Demonstrate report generation and data review procedures",
            "Ensure data quality and compliance with study protocols",
        ]);
        b.doc.add_heading(2, "1.2 Intended Audience");
        b.doc.add_paragraph("This guide is intended for:");
        b.doc.add_bullets([
            "Clinical Research Coordinators (CRCs)",
            "Site Personnel",
            "Data Managers",
            "Clinical Research Associates (CRAs)",
            "Principal Investigators",
        ]);
        b.doc.add_page_break();
    }

    fn appendix(&self, b: &mut GuideBuilder) {
        b.doc.add_heading(1, "7. Appendix");

        b.doc.add_heading(2, "7.1 Support Contact Information");
        b.doc.add_paragraph("For technical support or questions, contact:");
        b.doc.add_details([
            ("System", self.system.edc_system_name.as_str()),
            ("Email", self.system.support_email.as_str()),
            ("Phone", self.system.support_phone.as_str()),
        ]);

        b.doc.add_heading(2, "7.2 Common Abbreviations");
        let mut abbreviations = Table::new(["Abbreviation", "Definition"]);
        for (abbr, definition) in [
            ("AE", "Adverse Event"),
            ("CRF", "Case Report Form"),
            ("CRA", "Clinical Research Associate"),
            ("CRC", "Clinical Research Coordinator"),
            ("EDC", "Electronic Data Capture"),
            ("ePRO", "Electronic Patient Reported Outcome"),
            ("ICF", "Informed Consent Form"),
            ("PI", "Principal Investigator"),
            ("SAE", "Serious Adverse Event"),
        ] {
            abbreviations.push_row([abbr, definition]);
        }
        b.doc.add_table(abbreviations);

        b.doc.add_heading(2, "7.3 Document Revision History");
        b.doc.add_table(
            Table::new(["Version", "Date", "Author", "Changes"]).row([
                self.version.as_str(),
                self.date.as_str(),
                "Clinical Documentation Automation",
                "Initial release",
            ]),
        );
    }
}

struct GuideBuilder {
    doc: Document,
    screenshots: Vec<ScreenshotPlaceholder>,
}

impl GuideBuilder {
    fn screenshot(&mut self, section: &str, step: &str, description: &str) {
        let placeholder = ScreenshotPlaceholder {
            section: section.to_string(),
            step: step.to_string(),
            description: description.to_string(),
            width: 6.0,
            height: 4.0,
        };
        self.doc.push(Block::Callout(vec![
            "[SCREENSHOT PLACEHOLDER]".to_string(),
            format!("Section: {section}"),
            format!("Step: {step}"),
            format!("Description: {description}"),
        ]));
        self.screenshots.push(placeholder);
    }

    fn steps(&mut self, steps: Steps<'_>) {
        for (index, (title, description)) in steps.iter().enumerate() {
            self.doc
                .add_labelled(format!("Step {}: {title}.", index + 1), *description);
        }
    }

    fn terms(&mut self, terms: Steps<'_>) {
        for (term, description) in terms {
            self.doc.add_labelled(format!("{term}:"), *description);
        }
    }
}

fn system_access(b: &mut GuideBuilder) {
    const LOGIN: Steps<'static> = &[
        (
            "Navigate to the system URL",
            "Open your web browser and navigate to the system URL provided by your administrator.",
        ),
        ("Enter credentials", "Enter your username and password in the login fields."),
        (
            "Two-factor authentication (if applicable)",
            "If two-factor authentication is enabled, enter the verification code sent to your registered device.",
        ),
        ("Click Login", "Click the 'Login' button to access the system."),
    ];

    b.doc.add_heading(1, "2. System Access");
    b.doc.add_heading(2, "2.1 Logging In");
    for (index, (title, description)) in LOGIN.iter().enumerate() {
        let step = format!("Step {}", index + 1);
        b.doc.add_labelled(format!("{step}: {title}."), *description);
        b.screenshot(
            "System Access",
            &step,
            &format!("Screenshot showing {}", title.to_lowercase()),
        );
    }

    b.doc.add_heading(2, "2.2 Password Requirements");
    b.doc
        .add_paragraph("Your password must meet the following requirements:");
    b.doc.add_bullets([
        "Minimum 8 characters in length",
        "At least one uppercase letter",
        "At least one lowercase letter",
        "At least one number",
        "At least one special character (!@#$%^&*)",
        "Cannot be the same as your username",
        "Must be changed every 90 days",
    ]);

    b.doc.add_heading(2, "2.3 Troubleshooting Login Issues");
    b.terms(&[
        (
            "Forgot Password",
            "Click the 'Forgot Password' link on the login page and follow the instructions to reset your password.",
        ),
        (
            "Account Locked",
            "After 3 failed login attempts, your account will be locked. Contact your system administrator to unlock it.",
        ),
        (
            "Browser Compatibility",
            "Use the latest version of Chrome, Firefox, Safari, or Edge for optimal performance.",
        ),
    ]);
    b.doc.add_page_break();
}

fn navigation(b: &mut GuideBuilder) {
    b.doc.add_heading(1, "3. System Navigation");
    b.doc.add_heading(2, "3.1 Main Interface Overview");
    b.doc.add_paragraph(
        "After logging in, you will see the main interface with the following components:",
    );
    b.terms(&[
        ("Navigation Menu", "Located on the left side, provides access to all system functions"),
        ("Dashboard", "Displays study overview, pending tasks, and recent activities"),
        ("Patient List", "Shows all enrolled patients and their visit status"),
        ("Search Bar", "Allows quick search for patients, forms, or data"),
        ("User Profile", "Access to user settings and logout option"),
    ]);
    b.screenshot(
        "Navigation",
        "Main Interface",
        "Screenshot showing the main interface with all components labeled",
    );

    b.doc.add_heading(2, "3.2 Menu Structure");
    b.doc.add_bullets([
        "Home - Return to dashboard",
        "Patients - Manage patient records",
        "Data Entry - Access CRFs for data entry",
        "Queries - View and respond to data queries",
        "Reports - Generate and view reports",
        "Administration - System settings (admin users only)",
    ]);

    b.doc.add_heading(2, "3.3 Selecting a Patient");
    b.steps(&[
        ("Access Patient List", "Click on 'Patients' in the navigation menu"),
        ("Search or Browse", "Use the search bar or browse the patient list"),
        ("Select Patient", "Click on the patient ID or name to view patient details"),
        ("View Visit Schedule", "Review the patient's visit schedule and form status"),
    ]);
    b.screenshot(
        "Navigation",
        "Patient Selection",
        "Screenshot showing patient list and selection process",
    );
    b.doc.add_page_break();
}

fn data_entry(b: &mut GuideBuilder, forms: &[GuideForm]) {
    b.doc.add_heading(1, "4. Data Entry Instructions");
    b.doc.add_paragraph(
        "This section provides detailed instructions for entering data into each CRF form. \
         Please follow these instructions carefully to ensure data quality and compliance.",
    );

    b.doc.add_heading(2, "4.1 General Data Entry Guidelines");
    b.doc.add_bullets([
        "Always select the correct patient and visit before entering data",
        "Complete all required fields (marked with *)",
        "Follow field validation rules and format requirements",
        "Save your work frequently to prevent data loss",
        "Review all entered data before marking the form as complete",
        "Do not use abbreviations unless specified in the protocol",
        "Enter dates in the format specified (typically YYYY-MM-DD)",
        "For numeric fields, enter values within the specified range",
    ]);

    b.doc.add_heading(2, "4.2 Field Types Reference");
    b.terms(&[
        ("Text Field", "Enter free text. Maximum length may be specified."),
        ("Number Field", "Enter numeric values only. May have min/max validation."),
        ("Date Field", "Enter date in specified format. Use date picker if available."),
        ("Dropdown", "Select one option from the dropdown list."),
        ("Checkbox", "Select all applicable options."),
    ]);

    for (index, form) in forms.iter().enumerate() {
        form_instructions(b, form, index + 3);
    }
    b.doc.add_page_break();
}

fn form_instructions(b: &mut GuideBuilder, form: &GuideForm, number: usize) {
    b.doc.add_heading(2, format!("4.{number} {}", form.title));
    b.doc.add_labelled("Form Name:", &form.name);
    b.doc.add_labelled("Visit:", &form.visit);

    b.doc.add_labelled("Accessing the Form:", "");
    b.doc.add_bullets([
        format!("Navigate to Data Entry > {}", form.visit),
        "Select the patient".to_string(),
        format!("Click on '{}' in the form list", form.title),
    ]);
    let section = format!("Data Entry - {}", form.title);
    b.screenshot(
        &section,
        "Form Access",
        &format!("Screenshot showing how to access {}", form.title),
    );

    if !form.fields.is_empty() {
        b.doc.add_labelled("Field Instructions:", "");
        let mut table = Table::new(["Field Name", "Type", "Required", "Instructions"]);
        for field in &form.fields {
            table.push_row([
                field.label.clone(),
                field.data_type.label().to_string(),
                if field.required { "Yes" } else { "No" }.to_string(),
                field.instruction(),
            ]);
        }
        b.doc.add_table(table);
    }

    b.doc.add_labelled("Saving and Completing the Form:", "");
    b.doc.add_bullets([
        "Click 'Save' to save your progress without submitting",
        "Review all entered data for accuracy",
        "Click 'Save and Complete' when all required fields are filled",
        "Confirm that the form status changes to 'Complete'",
    ]);
    b.screenshot(
        &section,
        "Completed Form",
        &format!(
            "Screenshot showing completed {} with all fields filled",
            form.title
        ),
    );
}

fn query_management(b: &mut GuideBuilder) {
    b.doc.add_heading(1, "5. Query Management");
    b.doc.add_paragraph(
        "Queries are generated when there are questions or concerns about entered data. \
         This section explains how to view, respond to, and resolve queries.",
    );

    b.doc.add_heading(2, "5.1 Viewing Queries");
    b.steps(&[
        ("Access Query Module", "Click on 'Queries' in the navigation menu"),
        ("View Query List", "Review the list of open queries for your site"),
        ("Filter Queries", "Use filters to view queries by status, patient, or form"),
        ("Select Query", "Click on a query to view details"),
    ]);
    b.screenshot(
        "Query Management",
        "Query List",
        "Screenshot showing the query list with filters and status indicators",
    );

    b.doc.add_heading(2, "5.2 Query Status Types");
    b.terms(&[
        ("Open", "New query requiring response"),
        ("Answered", "Site has responded, awaiting review"),
        ("Closed", "Query has been resolved"),
        ("Cancelled", "Query has been cancelled by data manager"),
    ]);

    b.doc.add_heading(2, "5.3 Responding to Queries");
    b.steps(&[
        ("Open Query", "Click on the query to view details and the question"),
        ("Review Data", "Review the queried data field and protocol requirements"),
        ("Verify or Correct", "Either verify the data is correct or make corrections"),
        ("Enter Response", "Enter your response in the query response field"),
        ("Attach Documentation", "If needed, attach supporting documentation"),
        ("Submit Response", "Click 'Submit Response' to send your answer"),
        ("Confirm Submission", "Verify the query status changes to 'Answered'"),
    ]);
    b.screenshot(
        "Query Management",
        "Query Response",
        "Screenshot showing the query response interface with all fields",
    );

    b.doc.add_heading(2, "5.4 Query Response Best Practices");
    b.doc.add_bullets([
        "Respond to queries promptly (within 48 hours if possible)",
        "Provide clear and complete explanations",
        "Reference source documents when applicable",
        "Correct any data errors before responding",
        "Do not close queries yourself - wait for data manager to close",
        "Document any protocol deviations or exceptions",
        "Maintain professional communication in all responses",
    ]);
    b.doc.add_page_break();
}

fn report_generation(b: &mut GuideBuilder) {
    b.doc.add_heading(1, "6. Report Generation");
    b.doc.add_paragraph(
        "The system provides various reports for data review, monitoring, and study \
         management. This section explains how to generate and use different types of reports.",
    );

    b.doc.add_heading(2, "6.1 Available Reports");
    b.terms(&[
        ("Patient Enrollment Report", "Shows enrollment status and demographics"),
        ("Visit Completion Report", "Displays visit completion status by patient"),
        ("Data Completion Report", "Shows CRF completion rates"),
        ("Query Report", "Lists all open and closed queries"),
        ("Audit Trail Report", "Shows all data changes and user activities"),
        ("Missing Data Report", "Identifies incomplete forms and missing data"),
        ("Protocol Deviation Report", "Lists any protocol deviations or violations"),
    ]);

    b.doc.add_heading(2, "6.2 Generating a Report");
    b.steps(&[
        ("Access Reports", "Click on 'Reports' in the navigation menu"),
        ("Select Report Type", "Choose the report type from the available options"),
        ("Set Parameters", "Select date range, patients, visits, or other filters"),
        ("Choose Format", "Select output format (PDF, Excel, CSV)"),
        ("Generate Report", "Click 'Generate Report' button"),
        ("Download or View", "Download the report or view it in the browser"),
    ]);
    b.screenshot(
        "Report Generation",
        "Report Parameters",
        "Screenshot showing report generation interface with parameter selection",
    );

    b.doc.add_heading(2, "6.3 Scheduling Reports");
    b.doc.add_paragraph(
        "You can schedule reports to be generated automatically at regular intervals:",
    );
    b.steps(&[
        ("Select Report Type", "Choose the report you want to schedule"),
        ("Click Schedule", "Click the 'Schedule Report' button"),
        ("Set Frequency", "Choose daily, weekly, or monthly frequency"),
        ("Set Recipients", "Enter email addresses for report distribution"),
        ("Confirm Schedule", "Review and confirm the schedule settings"),
    ]);

    b.doc.add_heading(2, "6.4 Report Interpretation");
    b.doc.add_bullets([
        "Review report headers for generation date and parameters used",
        "Check for any warnings or alerts highlighted in red",
        "Compare current data with previous reports to track trends",
        "Use filters to drill down into specific issues or areas",
        "Export reports for sharing with study team members",
        "Archive important reports for regulatory compliance",
    ]);
    b.screenshot(
        "Report Generation",
        "Sample Report",
        "Screenshot showing a sample generated report with key features highlighted",
    );
    b.doc.add_page_break();
}

/// Write the screenshot checklist that accompanies a guide.
pub fn write_screenshot_list(screenshots: &[ScreenshotPlaceholder], path: &Path) -> Result<()> {
    let rule = "=".repeat(80);
    let divider = "-".repeat(80);
    let mut out = String::new();
    let _ = writeln!(out, "SCREENSHOT REQUIREMENTS LIST");
    let _ = writeln!(out, "{rule}\n");
    let _ = writeln!(out, "Total Screenshots Needed: {}", screenshots.len());
    let _ = writeln!(
        out,
        "Generated: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    for (index, shot) in screenshots.iter().enumerate() {
        let _ = writeln!(out, "{}. Section: {}", index + 1, shot.section);
        let _ = writeln!(out, "   Step: {}", shot.step);
        let _ = writeln!(out, "   Description: {}", shot.description);
        let _ = writeln!(out, "   Dimensions: {}\" x {}\"", shot.width, shot.height);
        let _ = writeln!(out, "   Status: Pending");
        let _ = writeln!(out, "{divider}");
    }
    fs::write(path, out).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
