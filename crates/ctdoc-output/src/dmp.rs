//! Data Management Plan assembly.
//!
//! The plan follows ICH GCP and 21 CFR Part 11 expectations: ten numbered
//! sections from introduction to archive, then appendices. Roles,
//! validation checks and database-lock criteria start from sensible
//! defaults and can be extended per study.

use chrono::Local;
use serde::{Deserialize, Serialize};

use ctdoc_model::{ProtocolInfo, Severity};

use crate::document::{Document, Table};
use crate::styles::DocumentStyles;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataManagementRole {
    pub role: String,
    pub organization: String,
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

/// A CRF domain as listed in the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmpDomain {
    pub name: String,
    pub description: String,
    pub critical: bool,
    pub validation_rules: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmpValidationCheck {
    pub check_type: String,
    pub description: String,
    pub severity: Severity,
    /// Real-time, Batch or Manual.
    pub implementation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub description: String,
    pub planned_date: String,
    pub responsible: String,
}

pub struct DmpAssembler<'a> {
    protocol: &'a ProtocolInfo,
    styles: DocumentStyles,
    version: String,
    date: String,
    edc_system: String,
    roles: Vec<DataManagementRole>,
    domains: Vec<DmpDomain>,
    checks: Vec<DmpValidationCheck>,
    lock_criteria: Vec<String>,
    milestones: Vec<Milestone>,
}

fn role(name: &str, organization: &str, responsibilities: &[&str]) -> DataManagementRole {
    DataManagementRole {
        role: name.to_string(),
        organization: organization.to_string(),
        responsibilities: responsibilities.iter().map(|r| (*r).to_string()).collect(),
        contact_person: None,
        contact_email: None,
    }
}

fn check(check_type: &str, description: &str, severity: Severity, implementation: &str) -> DmpValidationCheck {
    DmpValidationCheck {
        check_type: check_type.to_string(),
        description: description.to_string(),
        severity,
        implementation: implementation.to_string(),
    }
}

fn default_roles(sponsor: &str) -> Vec<DataManagementRole> {
    vec![
        role(
            "Data Management Lead",
            sponsor,
            &[
                "Overall oversight of data management activities",
                "Review and approval of DMP and related documents",
                "Database design review and approval",
                "Quality control oversight",
            ],
        ),
        role(
            "Clinical Data Manager",
            sponsor,
            &[
                "CRF design and database setup",
                "Data validation specification development",
                "Query management",
                "Database quality control",
                "Database lock execution",
            ],
        ),
        role(
            "Data Entry Personnel",
            "Clinical Site or CRO",
            &[
                "Data entry into EDC system",
                "Query resolution",
                "Source data verification support",
            ],
        ),
    ]
}

fn default_checks() -> Vec<DmpValidationCheck> {
    vec![
        check(
            "Required Field Check",
            "Ensure all mandatory fields are completed",
            Severity::Critical,
            "Real-time",
        ),
        check(
            "Range Check",
            "Verify numeric values are within expected ranges",
            Severity::Major,
            "Real-time",
        ),
        check(
            "Date Consistency",
            "Verify logical date sequences",
            Severity::Major,
            "Real-time",
        ),
        check(
            "Cross-form Validation",
            "Check consistency across related forms",
            Severity::Major,
            "Batch",
        ),
    ]
}

const DEFAULT_LOCK_CRITERIA: [&str; 9] = [
    "All CRFs completed and data entered into the database",
    "All data queries resolved or escalated to sponsor",
    "All monitoring visits completed and findings resolved",
    "SDV (Source Data Verification) completed as per monitoring plan",
    "All protocol deviations documented and reviewed",
    "Database quality control checks completed with acceptable error rate",
    "Medical coding completed and reviewed",
    "External data transfer completed and reconciled",
    "Database lock memo prepared and approved by relevant stakeholders",
];

/// Domains listed when the study has not defined its own.
const TYPICAL_DOMAINS: [&str; 11] = [
    "Demographics",
    "Medical History",
    "Inclusion/Exclusion Criteria",
    "Vital Signs",
    "Physical Examination",
    "Laboratory",
    "ECG",
    "Adverse Events",
    "Concomitant Medications",
    "Efficacy Assessments",
    "Study Drug Administration",
];

fn to_be_specified(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("To be specified")
}

/// Header row plus data rows as a table.
fn table_from(header: [&str; 3], rows: &[[&str; 3]]) -> Table {
    let mut table = Table::new(header);
    for row in rows {
        table.push_row(*row);
    }
    table
}

impl<'a> DmpAssembler<'a> {
    pub fn new(protocol: &'a ProtocolInfo, styles: DocumentStyles) -> Self {
        Self {
            protocol,
            styles,
            version: "1.0".to_string(),
            date: Local::now().format("%d-%b-%Y").to_string(),
            edc_system: "Electronic Data Capture (EDC) System".to_string(),
            roles: default_roles(protocol.display_sponsor()),
            domains: Vec::new(),
            checks: default_checks(),
            lock_criteria: DEFAULT_LOCK_CRITERIA.iter().map(|c| (*c).to_string()).collect(),
            milestones: Vec::new(),
        }
    }

    #[must_use]
    pub fn edc_system(mut self, name: impl Into<String>) -> Self {
        self.edc_system = name.into();
        self
    }

    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn add_role(&mut self, role: DataManagementRole) {
        self.roles.push(role);
    }

    pub fn add_domain(&mut self, domain: DmpDomain) {
        self.domains.push(domain);
    }

    pub fn add_validation_check(&mut self, check: DmpValidationCheck) {
        self.checks.push(check);
    }

    pub fn add_lock_criterion(&mut self, criterion: impl Into<String>) {
        self.lock_criteria.push(criterion.into());
    }

    pub fn add_milestone(&mut self, milestone: Milestone) {
        self.milestones.push(milestone);
    }

    pub fn roles(&self) -> &[DataManagementRole] {
        &self.roles
    }

    pub fn validation_checks(&self) -> &[DmpValidationCheck] {
        &self.checks
    }

    pub fn lock_criteria(&self) -> &[String] {
        &self.lock_criteria
    }

    pub fn build(&self) -> Document {
        let mut doc = Document::new("Data Management Plan", self.styles.clone());
        doc.set_footer(Some(format!(
            "Protocol {} | Data Management Plan v{}",
            self.protocol.display_number(),
            self.version
        )));

        self.cover_page(&mut doc);
        self.introduction(&mut doc);
        self.study_overview(&mut doc);
        self.responsibilities(&mut doc);
        self.data_flow(&mut doc);
        self.crf_design(&mut doc);
        self.data_validation(&mut doc);
        quality_control(&mut doc);
        self.database_lock(&mut doc);
        self.data_security(&mut doc);
        archive(&mut doc);
        self.appendices(&mut doc);
        doc
    }

    fn cover_page(&self, doc: &mut Document) {
        doc.add_title("Data Management Plan");
        doc.add_centered(self.protocol.display_title());
        doc.add_centered(format!(
            "Protocol Number: {}\nSponsor: {}\nVersion: {}",
            self.protocol.display_number(),
            self.protocol.display_sponsor(),
            self.version
        ));
        doc.add_centered(&self.date);
        doc.add_page_break();
    }

    fn introduction(&self, doc: &mut Document) {
        doc.add_heading(1, "1. Introduction");
        doc.add_paragraph(format!(
            "This Data Management Plan (DMP) outlines the data management strategy and \
             procedures for the clinical study \"{}\" (Protocol {}).",
            self.protocol.display_title(),
            self.protocol.display_number()
        ));
        doc.add_paragraph("The purpose of this DMP is to ensure that all clinical data are:");
        doc.add_bullets([
            "Collected accurately and completely",
            "Processed in a timely manner",
            "Validated according to predefined rules",
            "Stored securely with appropriate backup",
            "Maintained with full traceability and audit trail",
            "Compliant with ICH GCP, FDA 21 CFR Part 11, and applicable regulatory requirements",
        ]);
        doc.add_paragraph(
            "This document describes the data management responsibilities, processes, \
             systems, and quality control measures that will be implemented throughout the \
             study lifecycle.",
        );

        doc.add_heading(2, "1.1 Regulatory Compliance");
        doc.add_paragraph(
            "This Data Management Plan and all associated data management activities will \
             comply with:",
        );
        doc.add_bullets([
            "ICH E6(R2) Good Clinical Practice (GCP)",
            "FDA 21 CFR Part 11 - Electronic Records; Electronic Signatures",
            "FDA 21 CFR Part 50 - Protection of Human Subjects",
            "FDA 21 CFR Part 56 - Institutional Review Boards",
            "GDPR (General Data Protection Regulation) where applicable",
            "Local regulatory requirements in participating countries",
        ]);
    }

    fn study_overview(&self, doc: &mut Document) {
        let p = self.protocol;
        doc.add_heading(1, "2. Study Overview");
        doc.add_details([
            ("Protocol Number", p.display_number()),
            ("Protocol Title", p.display_title()),
            ("Sponsor", p.display_sponsor()),
            ("Indication", p.display_indication()),
            ("Phase", p.display_phase()),
            ("Study Design", to_be_specified(p.study_design.as_deref())),
            ("Target Sample Size", to_be_specified(p.sample_size.as_deref())),
            ("Target Population", to_be_specified(p.target_population.as_deref())),
        ]);
    }

    fn responsibilities(&self, doc: &mut Document) {
        doc.add_heading(1, "3. Data Management Responsibilities");
        doc.add_paragraph(
            "This section defines the roles and responsibilities of all parties involved in \
             data management activities for this clinical study.",
        );
        for (index, role) in self.roles.iter().enumerate() {
            doc.add_heading(2, format!("3.{} {}", index + 1, role.role));
            doc.add_labelled("Organization:", &role.organization);
            if let Some(person) = &role.contact_person {
                doc.add_labelled("Contact:", person);
            }
            if let Some(email) = &role.contact_email {
                doc.add_labelled("Email:", email);
            }
            doc.add_labelled("Responsibilities:", "");
            doc.add_bullets(role.responsibilities.iter().cloned());
        }
    }

    fn data_flow(&self, doc: &mut Document) {
        doc.add_heading(1, "4. Data Flow");
        doc.add_paragraph(
            "This section describes the flow of data from collection at clinical sites \
             through to final database lock and archival.",
        );

        doc.add_heading(2, "4.1 Data Collection and Entry");
        doc.add_numbered([
            "Source Data Collection: Clinical site staff will collect data from subjects and record in source documents".to_string(),
            format!("Data Entry: Authorized site personnel will enter data into the {}", self.edc_system),
            "Real-time Validation: The EDC system will perform immediate validation checks upon data entry".to_string(),
            "Edit Checks: Automated edit checks will identify potential errors or inconsistencies".to_string(),
            "Query Generation: System-generated or manual queries will be raised for data clarification".to_string(),
            "Query Resolution: Site staff will respond to queries with appropriate corrections or clarifications".to_string(),
            "Data Review: Data managers will review resolved queries and overall data quality".to_string(),
        ]);

        doc.add_heading(2, "4.2 Data Flow Diagram");
        doc.add_table(table_from(
            ["Step", "Activity", "Responsible Party"],
            &[
                ["1", "Source Data Collection", "Clinical Site Staff"],
                ["2", "Data Entry into EDC", "Site Data Entry Personnel"],
                ["3", "Real-time Validation", "EDC System (Automated)"],
                ["4", "Edit Check Execution", "EDC System (Automated)"],
                ["5", "Query Generation", "Clinical Data Manager"],
                ["6", "Query Resolution", "Clinical Site"],
                ["7", "Data Review & QC", "Clinical Data Manager"],
                ["8", "Medical Coding", "Medical Coder"],
                ["9", "Database Quality Control", "QC Reviewer"],
                ["10", "Database Lock", "Data Management Lead"],
            ],
        ));

        doc.add_heading(2, "4.3 External Data Transfer");
        doc.add_paragraph(
            "External data (e.g., central laboratory data, ECG data, imaging data) will be \
             transferred to the clinical database:",
        );
        doc.add_bullets([
            "Data Transfer Format: Specified transfer specifications will define the format and content",
            "Data Transfer Frequency: According to the schedule defined in vendor contracts",
            "Data Reconciliation: All external data will be reconciled against expected subjects and visits",
            "Data Integration: External data will be integrated into the clinical database with full traceability",
            "Quality Control: All transferred data will undergo quality control review",
        ]);
    }

    fn crf_design(&self, doc: &mut Document) {
        doc.add_heading(1, "5. CRF Design");
        doc.add_paragraph(format!(
            "The Case Report Form (CRF) design is based on the protocol requirements and will \
             capture all data necessary to evaluate the study objectives. The CRF will be \
             implemented in the {}.",
            self.edc_system
        ));

        doc.add_heading(2, "5.1 CRF Development Process");
        doc.add_numbered([
            "Protocol Review: Thorough review of the protocol to identify all data collection requirements",
            "Draft CRF Design: Create draft CRF based on protocol and study-specific requirements",
            "Stakeholder Review: Circulate draft CRF to clinical team, biostatistics, and medical monitor",
            "CRF Finalization: Incorporate feedback and finalize CRF design",
            "Database Build: Implement CRF in EDC system",
            "User Acceptance Testing (UAT): Conduct comprehensive testing of database and CRFs",
            "CRF Approval: Obtain final approval from all stakeholders",
        ]);

        doc.add_heading(2, "5.2 CRF Domains");
        if self.domains.is_empty() {
            doc.add_paragraph(
                "CRF domains will be defined based on protocol requirements. Typical domains \
                 include:",
            );
            doc.add_bullets(TYPICAL_DOMAINS);
        } else {
            doc.add_paragraph("The following CRF domains have been identified for this study:");
            let mut table = Table::new(["Domain", "Description", "Critical", "Validation Rules"]);
            for domain in &self.domains {
                table.push_row([
                    domain.name.clone(),
                    domain.description.clone(),
                    if domain.critical { "Yes" } else { "No" }.to_string(),
                    domain.validation_rules.to_string(),
                ]);
            }
            doc.add_table(table);
        }

        doc.add_heading(2, "5.3 CRF Conventions");
        doc.add_bullets([
            "Date Format: DD-MMM-YYYY (e.g., 15-Jan-2025)",
            "Time Format: 24-hour format (HH:MM)",
            "Missing Data: Explicit reasons for missing data will be captured",
            "Units: Standard units will be specified for all measurements",
            "Coding: Medical coding will use MedDRA for adverse events and WHO Drug for medications",
            "Derived Variables: Automatically calculated fields will be clearly indicated",
            "Required Fields: Mandatory fields will be marked with an asterisk (*)",
        ]);
    }

    fn data_validation(&self, doc: &mut Document) {
        doc.add_heading(1, "6. Data Validation");
        doc.add_paragraph(
            "Validation checks are implemented in the EDC system to identify potential errors \
             and inconsistencies in real-time or through batch processes.",
        );

        doc.add_heading(2, "6.1 Validation Strategy");
        doc.add_bullets([
            "Real-time Validation: Immediate checks performed during data entry",
            "Batch Validation: Periodic checks run across the entire database",
            "Manual Review: Targeted review by data managers and medical monitors",
            "Cross-form Validation: Consistency checks across related CRF pages",
            "Protocol Deviation Checks: Automated detection of potential protocol deviations",
        ]);

        doc.add_heading(2, "6.2 Validation Checks");
        let mut table = Table::new(["Check Type", "Description", "Severity", "Implementation"]);
        for check in &self.checks {
            table.push_row([
                check.check_type.as_str(),
                check.description.as_str(),
                check.severity.as_str(),
                check.implementation.as_str(),
            ]);
        }
        doc.add_table(table);

        doc.add_heading(2, "6.3 Query Management");
        doc.add_bullets([
            "Query Generation: Queries will be generated automatically by the EDC system or manually by data managers",
            "Query Assignment: Queries will be assigned to appropriate site personnel",
            "Query Response: Sites must respond to queries with corrections or explanations",
            "Query Review: Data managers will review query responses for adequacy",
            "Query Closure: Queries will be closed only after satisfactory resolution",
            "Query Metrics: Regular reports on query volume, aging, and resolution rates will be generated",
        ]);
    }

    fn database_lock(&self, doc: &mut Document) {
        doc.add_heading(1, "8. Database Lock");
        doc.add_paragraph(
            "Database lock is the process of freezing the clinical database after all data \
             have been entered, validated, and quality control activities completed. Once \
             locked, no further changes to data are permitted without proper documentation \
             and approval.",
        );

        doc.add_heading(2, "8.1 Database Lock Criteria");
        doc.add_paragraph("The database will be locked when the following criteria are met:");
        doc.add_numbered(self.lock_criteria.iter().cloned());

        doc.add_heading(2, "8.2 Database Lock Process");
        doc.add_table(table_from(
            ["Step", "Activity", "Responsible"],
            &[
                ["1", "Pre-lock database quality control review", "QC Team"],
                ["2", "Generate and review pre-lock data listings", "Clinical Data Manager"],
                ["3", "Prepare database lock memo documenting readiness", "Data Management Lead"],
                ["4", "Circulate lock memo for stakeholder review/approval", "Data Management Lead"],
                ["5", "Execute database lock in EDC system", "Clinical Data Manager"],
                ["6", "Generate final locked database extract", "Clinical Data Manager"],
            ],
        ));

        doc.add_heading(2, "8.3 Post-Lock Changes");
        doc.add_paragraph("After database lock, any changes to data must be:");
        doc.add_bullets([
            "Documented with clear justification for the change",
            "Approved by the Data Management Lead and Medical Monitor",
            "Tracked in a post-lock change log",
            "Implemented only after database unlock authorization",
            "Followed by re-lock of the database",
        ]);
    }

    fn data_security(&self, doc: &mut Document) {
        doc.add_heading(1, "9. Data Security");
        doc.add_paragraph(
            "Data security measures ensure the confidentiality, integrity, and availability of \
             clinical trial data throughout the study lifecycle.",
        );

        doc.add_heading(2, "9.1 Access Control");
        doc.add_paragraph(format!(
            "Access to the {} and clinical data is strictly controlled:",
            self.edc_system
        ));
        doc.add_bullets([
            "User Authentication: All users must authenticate with unique username and password",
            "Role-Based Access: Access rights assigned based on user role and responsibilities",
            "Password Policy: Strong password requirements with regular password changes",
            "Account Deactivation: Immediate deactivation of accounts when users leave the study",
            "Access Logs: All system access is logged and periodically reviewed",
            "Training Requirements: All users must complete system training before access is granted",
        ]);

        doc.add_heading(2, "9.2 Audit Trail");
        doc.add_paragraph(format!(
            "The {} maintains a complete audit trail for all data and system activities:",
            self.edc_system
        ));
        doc.add_bullets([
            "All data entries, modifications, and deletions are logged",
            "Audit trail records user ID, date/time, old value, new value, and reason for change",
            "Audit trail cannot be modified or deleted by any user",
            "Audit trail is included in all database extracts and archives",
        ]);

        doc.add_heading(2, "9.3 Data Protection and Privacy");
        doc.add_bullets([
            "Subject Identification: Subjects identified by unique subject ID, not by name",
            "Data De-identification: Personal identifiers removed from datasets for analysis",
            "Secure Transmission: All data transmissions encrypted using industry-standard protocols (SSL/TLS)",
            "Data Storage: Data stored in secure, access-controlled servers",
        ]);

        doc.add_heading(2, "9.4 Backup and Disaster Recovery");
        doc.add_bullets([
            "Regular Backups: Database backups performed daily",
            "Backup Storage: Backups stored in geographically separate secure location",
            "Backup Testing: Regular restoration tests to verify backup integrity",
            "Recovery Time Objective (RTO): System restored within 24 hours of failure",
        ]);
    }

    fn appendices(&self, doc: &mut Document) {
        doc.add_heading(1, "Appendix A: Abbreviations and Definitions");
        let mut abbreviations = Table::new(["Abbreviation", "Definition"]);
        for (abbr, definition) in [
            ("AE", "Adverse Event"),
            ("CDISC", "Clinical Data Interchange Standards Consortium"),
            ("CRF", "Case Report Form"),
            ("CRO", "Contract Research Organization"),
            ("DM", "Data Management"),
            ("DMP", "Data Management Plan"),
            ("DVP", "Data Validation Plan"),
            ("EDC", "Electronic Data Capture"),
            ("GCP", "Good Clinical Practice"),
            ("ICH", "International Council for Harmonisation"),
            ("QC", "Quality Control"),
            ("SAE", "Serious Adverse Event"),
            ("SDV", "Source Data Verification"),
            ("UAT", "User Acceptance Testing"),
        ] {
            abbreviations.push_row([abbr, definition]);
        }
        doc.add_table(abbreviations);

        if !self.milestones.is_empty() {
            doc.add_heading(1, "Appendix B: Project Timeline");
            let mut timeline =
                Table::new(["Milestone", "Description", "Planned Date", "Responsible"]);
            for milestone in &self.milestones {
                timeline.push_row([
                    milestone.name.as_str(),
                    milestone.description.as_str(),
                    milestone.planned_date.as_str(),
                    milestone.responsible.as_str(),
                ]);
            }
            doc.add_table(timeline);
        }
    }
}

fn quality_control(doc: &mut Document) {
    doc.add_heading(1, "7. Data Quality Control");
    doc.add_paragraph(
        "Data quality control (QC) activities ensure that data in the clinical database are \
         accurate, complete, and consistent with source documents.",
    );

    doc.add_heading(2, "7.1 QC Strategy");
    doc.add_bullets([
        "Database Design QC: Review and testing of database build before study initiation",
        "Ongoing Data Review: Regular review of data listings and query reports",
        "Data Cleaning: Systematic review and resolution of data inconsistencies",
        "Medical Coding QC: Quality control of medical and drug coding",
        "External Data QC: Verification of externally transferred data",
        "Pre-Lock QC: Comprehensive quality control review before database lock",
    ]);

    doc.add_heading(2, "7.2 QC Activities and Frequency");
    doc.add_table(table_from(
        ["QC Activity", "Frequency", "Responsible"],
        &[
            ["Data Entry Audit", "Monthly", "QC Reviewer"],
            ["Query Report Review", "Weekly", "Clinical Data Manager"],
            ["Medical Coding Review", "Ongoing", "Medical Coding Lead"],
            ["Data Listing Review", "Bi-weekly", "Clinical Data Manager"],
            ["External Data Reconciliation", "Per transfer", "Clinical Data Manager"],
            ["Protocol Deviation Review", "Monthly", "Data Management Lead"],
            ["Pre-Lock Database Review", "Before lock", "QC Team"],
        ],
    ));

    doc.add_heading(2, "7.3 Quality Metrics");
    doc.add_bullets([
        "Data Entry Accuracy Rate: Percentage of fields entered correctly without queries",
        "Query Response Time: Average time from query generation to resolution",
        "Open Query Rate: Percentage of open queries relative to total data points",
        "Critical Field Completion Rate: Percentage of critical fields completed",
        "Protocol Deviation Rate: Number of deviations per enrolled subject",
        "Database Error Rate: Errors identified per 1000 data points reviewed",
    ]);
    doc.add_paragraph("Target: Maintain error rate below 0.5% before database lock.");
}

fn archive(doc: &mut Document) {
    doc.add_heading(1, "10. Archive");
    doc.add_paragraph(
        "All clinical data, documentation, and related materials will be archived according \
         to regulatory requirements and company policies.",
    );

    doc.add_heading(2, "10.1 Archival Requirements");
    doc.add_bullets([
        "Clinical Database: Final locked database with complete audit trail",
        "Database Specifications: Database design documents, validation specifications, edit check specifications",
        "CRF and eCRF: Blank CRFs, CRF completion guidelines, database setup specifications",
        "Data Management Plan: This document and any amendments",
        "Query Reports: All query reports and resolution documentation",
        "Quality Control Documentation: QC reports, findings, and resolutions",
        "Database Lock Documentation: Database lock memo and approvals",
        "System Validation: EDC system validation documentation",
    ]);

    doc.add_heading(2, "10.2 Retention Period");
    let mut retention = Table::new(["Document Type", "Retention Period"]);
    for (kind, period) in [
        (
            "Clinical Database and Documentation",
            "At least 25 years or per regulatory requirement",
        ),
        ("Essential Documents", "25 years after study completion"),
        ("Audit Trail and Logs", "25 years after study completion"),
    ] {
        retention.push_row([kind, period]);
    }
    doc.add_table(retention);

    doc.add_heading(2, "10.3 Archive Format and Storage");
    doc.add_bullets([
        "Archive Format: PDF/A for documents, FDA-compliant datasets (e.g., CDISC SDTM/ADaM)",
        "Storage Media: Secure electronic archive system with appropriate backup",
        "Accessibility: Archived materials must be retrievable within 24 hours for regulatory inspection",
        "Archive Index: Comprehensive index of all archived materials for easy retrieval",
    ]);
}
