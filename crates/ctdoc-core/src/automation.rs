//! Single-protocol orchestration.

use std::fs;
use std::mem;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, error, info, info_span, warn};

use ctdoc_ingest::{ProtocolParser, save_protocol_json};
use ctdoc_model::{DocumentKind, ProtocolInfo, RunReport, Severity, TaskKind};
use ctdoc_output::{
    CrfAssembler, Document, DocumentBackend, DocumentStyles, DmpAssembler, DmpDomain,
    DvpAssembler, GuideForm, UserGuideAssembler, validate_style, write_screenshot_list,
};
use ctdoc_standards::{
    CrfDomain, load_default_dvp_fields, load_standard_crf_domains, resolve_domains,
};
use ctdoc_validate::{RuleGenerator, create_dvp_rules, write_rules_csv, write_rules_json};

use crate::error::{Result, StepError, WorkflowError};
use crate::options::WorkflowOptions;
use crate::report::write_run_report;

const PROTOCOL_JSON: &str = "protocol_info.json";
const BACKUP_DIR: &str = "_backup";
const DMP_NOT_IMPLEMENTED: &str = "DMP generator not implemented";

/// What a step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The artifact was written.
    Completed(PathBuf),
    /// A precondition was missing; the step counts as unsuccessful.
    Skipped(String),
    /// The step is intentionally not performed and does not count against
    /// the run.
    Deferred(String),
}

type StepResult<T = StepOutcome> = std::result::Result<T, StepError>;

/// Runs the document workflow for one protocol.
pub struct Automation<'a> {
    input: PathBuf,
    output_dir: PathBuf,
    parser: &'a dyn ProtocolParser,
    backend: &'a dyn DocumentBackend,
    options: WorkflowOptions,
    report: RunReport,
    protocol: Option<ProtocolInfo>,
    // supporting files of the step in flight, listed once it completes
    pending_files: Vec<PathBuf>,
}

impl<'a> Automation<'a> {
    /// Check the constructor preconditions and create the output directory.
    ///
    /// Fails when the input does not exist or the parser needs a credential
    /// that was not supplied. No task exists yet when this fails.
    pub fn new(
        input: impl Into<PathBuf>,
        parser: &'a dyn ProtocolParser,
        backend: &'a dyn DocumentBackend,
        options: WorkflowOptions,
    ) -> Result<Self> {
        let input = input.into();
        if !input.is_file() {
            return Err(WorkflowError::MissingInput { path: input });
        }
        let has_credential = options
            .credential
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if parser.requires_credential() && !has_credential {
            return Err(WorkflowError::MissingCredential {
                parser: parser.name(),
            });
        }

        let output_dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&input));
        fs::create_dir_all(&output_dir).map_err(|source| WorkflowError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;

        info!(
            input = %input.display(),
            output_dir = %output_dir.display(),
            parser = parser.name(),
            backend = backend.name(),
            "automation initialised"
        );
        Ok(Self {
            report: RunReport::new(&input, &output_dir),
            input,
            output_dir,
            parser,
            backend,
            options,
            protocol: None,
            pending_files: Vec::new(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    pub fn protocol_info(&self) -> Option<&ProtocolInfo> {
        self.protocol.as_ref()
    }

    /// Run every requested step, then write the report pair.
    ///
    /// A failed parse stops the run before any generation task exists.
    /// Generation steps run regardless of how their siblings ended. The
    /// report files are written even when bookkeeping itself fails.
    pub fn run(mut self) -> RunReport {
        let span = info_span!("automation", input = %self.input.display());
        let _guard = span.enter();
        let outcome = self.run_steps();
        self.conclude(outcome)
    }

    /// Record an error that escaped the steps, stamp the end time and
    /// persist the report.
    fn conclude(mut self, outcome: Result<()>) -> RunReport {
        if let Err(error) = outcome {
            error!(%error, "unexpected error during automation run");
            if let Err(record_error) = self.report.record_error(format!("Unexpected error: {error}")) {
                error!(error = %record_error, "could not record unexpected error in run report");
            }
        }

        self.report.finish();
        match write_run_report(&self.report, &self.output_dir) {
            Ok((json, text)) => info!(
                json = %json.display(),
                text = %text.display(),
                "run report written"
            ),
            Err(error) => error!(%error, "failed to write run report"),
        }
        info!(
            total = self.report.total_tasks(),
            completed = self.report.completed_tasks(),
            failed = self.report.failed_tasks(),
            skipped = self.report.skipped_tasks(),
            success_rate = format!("{:.1}%", self.report.success_rate()),
            "automation finished"
        );
        self.report
    }

    fn run_steps(&mut self) -> Result<()> {
        if !self.parse_protocol()? {
            error!("protocol parsing failed, stopping run");
            return Ok(());
        }
        for kind in DocumentKind::ALL {
            if self.options.wants(kind) {
                self.generate(kind)?;
            }
        }
        Ok(())
    }

    /// Parse the protocol and save `protocol_info.json`.
    ///
    /// Returns whether parsing succeeded. `Err` means bookkeeping broke.
    pub fn parse_protocol(&mut self) -> Result<bool> {
        let kind = TaskKind::ProtocolParsing;
        let index = self.report.begin_task(kind)?;
        self.report.start_task(index)?;
        info!(task = %kind, input = %self.input.display(), "step started");

        let outcome = self
            .parser
            .parse(&self.input, self.options.max_pages)
            .and_then(|info| {
                let path = self.output_dir.join(PROTOCOL_JSON);
                save_protocol_json(&info, &path)?;
                Ok((info, path))
            });
        match outcome {
            Ok((info, path)) => {
                info!(
                    title = info.display_title(),
                    protocol_number = info.display_number(),
                    phase = info.display_phase(),
                    "protocol parsed"
                );
                self.report.set_protocol_info(info.clone())?;
                self.protocol = Some(info);
                self.record_outcome(index, kind, Ok(StepOutcome::Completed(path)))
            }
            Err(error) => self.record_outcome(index, kind, Err(error.into())),
        }
    }

    /// Run one generation step under the uniform step contract.
    ///
    /// Returns whether the step counts as successful. `Err` means
    /// bookkeeping broke.
    pub fn generate(&mut self, kind: DocumentKind) -> Result<bool> {
        let task = kind.task_kind();
        let index = self.report.begin_task(task)?;
        info!(task = %task, "step started");

        if kind == DocumentKind::Dmp && !self.options.dmp_enabled {
            let outcome = StepOutcome::Deferred(DMP_NOT_IMPLEMENTED.to_string());
            return self.record_outcome(index, task, Ok(outcome));
        }

        self.report.start_task(index)?;
        let outcome = match self.protocol.clone() {
            None => Ok(StepOutcome::Skipped(format!(
                "Cannot generate {}: protocol information not parsed",
                document_label(kind)
            ))),
            Some(protocol) => match kind {
                DocumentKind::Crf => self.generate_crf(&protocol),
                DocumentKind::Dvp => self.generate_dvp(&protocol),
                DocumentKind::UserGuide => self.generate_user_guide(&protocol),
                DocumentKind::Dmp => self.generate_dmp(&protocol),
            },
        };
        self.record_outcome(index, task, outcome)
    }

    fn record_outcome(&mut self, index: usize, task: TaskKind, outcome: StepResult) -> Result<bool> {
        let supporting = mem::take(&mut self.pending_files);
        match outcome {
            Ok(StepOutcome::Completed(path)) => {
                info!(task = %task, path = %path.display(), "step completed");
                self.report.complete_task(index, path)?;
                for file in supporting {
                    self.report.add_generated_file(file)?;
                }
                Ok(true)
            }
            Ok(StepOutcome::Skipped(reason)) => {
                warn!(task = %task, %reason, "step skipped");
                self.report.skip_task(index, reason)?;
                Ok(false)
            }
            Ok(StepOutcome::Deferred(reason)) => {
                warn!(task = %task, %reason, "step deferred");
                self.report.skip_task(index, reason)?;
                Ok(true)
            }
            Err(step_error) => {
                let message = format!("{} failed: {step_error}", task_label(task));
                error!(task = %task, error = %step_error, "step failed");
                self.report.fail_task(index, message)?;
                Ok(false)
            }
        }
    }

    fn generate_crf(&mut self, protocol: &ProtocolInfo) -> StepResult {
        let path = self.artifact_path(DocumentKind::Crf, protocol, ".docx");
        self.backup_existing(&path);

        let domains = self.crf_domains(protocol)?;
        info!(domains = domains.len(), "assembling CRF");
        let doc = CrfAssembler::new(protocol, self.styles()).build(&domains);
        self.check_style(&doc);
        Ok(StepOutcome::Completed(self.backend.write(&doc, &path)?))
    }

    fn generate_dvp(&mut self, protocol: &ProtocolInfo) -> StepResult {
        let path = self.artifact_path(DocumentKind::Dvp, protocol, ".docx");
        let json_path = self.artifact_path(DocumentKind::Dvp, protocol, "_rules.json");
        let csv_path = self.artifact_path(DocumentKind::Dvp, protocol, "_rules.csv");
        for target in [&path, &json_path, &csv_path] {
            self.backup_existing(target);
        }

        let fields = if self.options.fields.is_empty() {
            load_default_dvp_fields()?
        } else {
            self.options.fields.clone()
        };
        let generator = create_dvp_rules(fields, &self.options.custom_rules)?;
        info!(rules = generator.rules().len(), "validation rules generated");
        for (category, count) in generator.rules_summary() {
            debug!(category, count, "rule count");
        }

        let doc = DvpAssembler::new(protocol, self.styles()).build(generator.rules());
        self.check_style(&doc);
        let written = self.backend.write(&doc, &path)?;

        let records = generator.export_rules();
        write_rules_json(&json_path, &records)?;
        write_rules_csv(&csv_path, &records)?;
        self.pending_files.extend([json_path, csv_path]);
        Ok(StepOutcome::Completed(written))
    }

    fn generate_user_guide(&mut self, protocol: &ProtocolInfo) -> StepResult {
        let path = self.artifact_path(DocumentKind::UserGuide, protocol, ".docx");
        let list_path = self.artifact_path(DocumentKind::UserGuide, protocol, "_screenshots.txt");
        self.backup_existing(&path);
        self.backup_existing(&list_path);

        let forms: Vec<GuideForm> = self
            .crf_domains(protocol)?
            .iter()
            .map(GuideForm::from_domain)
            .collect();
        let guide =
            UserGuideAssembler::new(protocol, self.styles(), self.options.system.clone())
                .build(&forms);
        self.check_style(&guide.document);
        let written = self.backend.write(&guide.document, &path)?;

        write_screenshot_list(&guide.screenshots, &list_path)?;
        info!(
            forms = forms.len(),
            screenshots = guide.screenshots.len(),
            "user guide assembled"
        );
        self.pending_files.push(list_path);
        Ok(StepOutcome::Completed(written))
    }

    fn generate_dmp(&mut self, protocol: &ProtocolInfo) -> StepResult {
        let path = self.artifact_path(DocumentKind::Dmp, protocol, ".docx");
        self.backup_existing(&path);

        let mut assembler = DmpAssembler::new(protocol, self.styles())
            .edc_system(self.options.system.edc_system_name.clone());
        for domain in self.crf_domains(protocol)? {
            assembler.add_domain(dmp_domain(&domain)?);
        }
        let doc = assembler.build();
        self.check_style(&doc);
        Ok(StepOutcome::Completed(self.backend.write(&doc, &path)?))
    }

    fn crf_domains(&self, protocol: &ProtocolInfo) -> StepResult<Vec<CrfDomain>> {
        let standard = load_standard_crf_domains()?;
        let selection = resolve_domains(
            &protocol.crf_domains,
            &standard,
            &self.options.custom_domains,
        );
        if !selection.unknown.is_empty() {
            warn!(unknown = ?selection.unknown, "protocol names CRF domains with no definition");
        }
        Ok(selection.domains)
    }

    fn styles(&self) -> DocumentStyles {
        self.options.style.styles()
    }

    fn artifact_path(&self, kind: DocumentKind, protocol: &ProtocolInfo, suffix: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}{suffix}",
            kind.file_prefix(),
            protocol.file_token()
        ))
    }

    /// Style problems never fail a step.
    fn check_style(&self, doc: &Document) {
        let report = validate_style(doc, self.options.style);
        for issue in &report.issues {
            warn!(document = doc.title(), profile = %self.options.style, %issue, "style issue");
        }
        for warning in &report.warnings {
            debug!(document = doc.title(), profile = %self.options.style, %warning, "style warning");
        }
    }

    fn backup_existing(&self, path: &Path) {
        if !self.options.backup || !path.is_file() {
            return;
        }
        let Some(name) = path.file_name() else {
            return;
        };
        let backup_dir = self.output_dir.join(BACKUP_DIR);
        let target = backup_dir.join(name);
        let copied = fs::create_dir_all(&backup_dir).and_then(|()| fs::copy(path, &target));
        match copied {
            Ok(_) => debug!(from = %path.display(), to = %target.display(), "backed up"),
            Err(error) => warn!(path = %path.display(), %error, "backup failed"),
        }
    }
}

/// `output_<stem>_<YYYYmmdd_HHMMSS>` in the working directory.
fn default_output_dir(input: &Path) -> PathBuf {
    PathBuf::from(format!(
        "output_{}_{}",
        file_stem(input),
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "protocol".to_string())
}

/// Domain row for the DMP: rule count from the catalogue-derived checks,
/// critical when any of them is.
fn dmp_domain(domain: &CrfDomain) -> StepResult<DmpDomain> {
    let mut generator = RuleGenerator::new();
    generator.add_fields(domain.field_definitions());
    let mut rules = generator.generate_required_field_checks()?;
    rules.extend(generator.generate_range_checks()?);
    rules.extend(generator.generate_date_consistency_checks()?);
    rules.extend(generator.generate_logical_checks()?);
    Ok(DmpDomain {
        name: domain.name.clone(),
        description: domain.description.clone(),
        critical: rules.iter().any(|rule| rule.severity() == Severity::Critical),
        validation_rules: rules.len(),
    })
}

fn document_label(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Crf => "CRF",
        DocumentKind::Dvp => "DVP",
        DocumentKind::UserGuide => "User Guide",
        DocumentKind::Dmp => "DMP",
    }
}

fn task_label(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::ProtocolParsing => "Protocol parsing",
        TaskKind::Crf => "CRF generation",
        TaskKind::Dvp => "DVP generation",
        TaskKind::UserGuide => "User Guide generation",
        TaskKind::Dmp => "DMP generation",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_dir_uses_stem_and_timestamp() {
        let dir = default_output_dir(Path::new("/data/ABC-123 protocol.pdf"));
        let name = dir.to_string_lossy();
        assert!(name.starts_with("output_ABC-123 protocol_"));
        // YYYYmmdd_HHMMSS
        assert_eq!(name.len(), "output_ABC-123 protocol_".len() + 15);
    }

    #[test]
    fn escaped_error_is_recorded_and_report_still_written() {
        use ctdoc_ingest::JsonProtocolParser;
        use ctdoc_model::ModelError;
        use ctdoc_output::DocxBackend;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("p.json");
        fs::write(&input, "{}").unwrap();
        let out = dir.path().join("out");
        let options = WorkflowOptions::default().with_output_dir(&out);
        let automation = Automation::new(&input, &JsonProtocolParser, &DocxBackend, options).unwrap();

        let report = automation.conclude(Err(ModelError::UnknownTask { index: 7 }.into()));

        assert_eq!(
            report.errors().to_vec(),
            vec!["Unexpected error: no task at index 7".to_string()]
        );
        assert!(report.is_finished());
        assert_eq!(report.total_tasks(), 0);
        assert!(out.join(crate::report::REPORT_JSON).is_file());
        assert!(out.join(crate::report::REPORT_TEXT).is_file());
    }

    #[test]
    fn dmp_domain_flags_required_fields_as_critical() {
        let domains = load_standard_crf_domains().unwrap();
        let vitals = domains.iter().find(|d| d.key == "vital_signs").unwrap();
        let row = dmp_domain(vitals).unwrap();
        assert_eq!(row.name, "Vital Signs");
        assert!(row.critical);
        assert!(row.validation_rules > 0);
    }
}
