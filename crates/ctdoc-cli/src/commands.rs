use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use ctdoc_cli::config::{AppConfig, resolve_kinds};
use ctdoc_core::{Automation, BatchRunner, BatchSummary, WorkflowOptions};
use ctdoc_ingest::{AutoProtocolParser, load_field_catalogue};
use ctdoc_model::{DocumentKind, RunReport};
use ctdoc_output::DocxBackend;
use ctdoc_standards::{load_default_dvp_fields, load_standard_crf_domains};
use ctdoc_validate::{RuleGenerator, create_dvp_rules, write_rules_csv_to};

use crate::cli::{BatchArgs, GenerateArgs, RulesArgs, RulesFormatArg, RunArgs};
use crate::summary::{apply_table_style, print_rules_table};

pub fn run_domains() -> Result<()> {
    let domains = load_standard_crf_domains().context("load standard CRF domains")?;
    let mut table = Table::new();
    table.set_header(vec!["Key", "Domain", "Fields", "Description"]);
    apply_table_style(&mut table);
    for domain in domains {
        table.add_row(vec![
            domain.key,
            domain.name,
            domain.fields.len().to_string(),
            domain.description,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_protocol(args: &RunArgs, config: &AppConfig) -> Result<RunReport> {
    let options = workflow_options(&args.generate, config)?;
    let parser = AutoProtocolParser;
    let backend = DocxBackend;
    let automation = Automation::new(&args.protocol, &parser, &backend, options)
        .with_context(|| format!("start automation for {}", args.protocol.display()))?;
    Ok(automation.run())
}

pub fn run_batch(args: &BatchArgs, config: &AppConfig) -> Result<BatchSummary> {
    let mut options = workflow_options(&args.generate, config)?;
    let base_dir = options
        .output_dir
        .take()
        .or_else(|| config.workflow.batch_output_dir.clone());
    let runner = BatchRunner::new(base_dir, options).with_progress(io::stderr().is_terminal());
    runner
        .run(&args.protocols, &AutoProtocolParser, &DocxBackend)
        .context("write batch summary")
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let span = info_span!("rules");
    let _guard = span.enter();
    let generator = rule_generator(args)?;
    let records = generator.export_rules();
    match args.format {
        RulesFormatArg::Table => print_rules_table(&generator),
        RulesFormatArg::Json => {
            let json = serde_json::to_string_pretty(&records).context("serialize rules")?;
            println!("{json}");
        }
        RulesFormatArg::Csv => {
            write_rules_csv_to(io::stdout().lock(), &records).context("write rules CSV")?;
        }
    }
    Ok(())
}

fn rule_generator(args: &RulesArgs) -> Result<RuleGenerator> {
    let (fields, custom_rules) = match &args.fields {
        Some(path) => {
            let catalogue = load_field_catalogue(path)
                .with_context(|| format!("load field catalogue {}", path.display()))?;
            (catalogue.fields, catalogue.custom_rules)
        }
        None => (Vec::new(), Vec::new()),
    };
    let fields = if fields.is_empty() {
        load_default_dvp_fields().context("load standard validation fields")?
    } else {
        fields
    };
    create_dvp_rules(fields, &custom_rules).context("generate validation rules")
}

/// Merge command-line flags over the configuration file.
pub fn workflow_options(args: &GenerateArgs, config: &AppConfig) -> Result<WorkflowOptions> {
    let kinds = if args.generate.is_empty() {
        config
            .document_kinds()
            .context("invalid [workflow] generate entry")?
    } else {
        requested_kinds(args)?
    };
    let mut options = WorkflowOptions {
        output_dir: args.output_dir.clone(),
        kinds,
        backup: config.workflow.backup && !args.no_backup,
        max_pages: args.max_pages.or(config.workflow.max_pages),
        style: args.style.map_or(config.style.profile, Into::into),
        dmp_enabled: args.enable_dmp || config.workflow.dmp_enabled,
        credential: args.api_key.clone(),
        system: config.system.clone(),
        ..WorkflowOptions::default()
    };
    if let Some(path) = &args.fields {
        let catalogue = load_field_catalogue(path)
            .with_context(|| format!("load field catalogue {}", path.display()))?;
        options.fields = catalogue.fields;
        options.custom_rules = catalogue.custom_rules;
        options.custom_domains = catalogue.custom_domains;
    }
    Ok(options)
}

fn requested_kinds(args: &GenerateArgs) -> Result<Vec<DocumentKind>> {
    let names: Vec<&str> = args
        .generate
        .iter()
        .map(|arg| arg.kind().map_or("all", |kind| kind.as_str()))
        .collect();
    resolve_kinds(&names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GenerateArg, StyleArg};
    use ctdoc_output::StyleProfile;

    fn args() -> GenerateArgs {
        GenerateArgs {
            output_dir: None,
            generate: Vec::new(),
            no_backup: false,
            fields: None,
            max_pages: None,
            style: None,
            enable_dmp: false,
            api_key: None,
        }
    }

    #[test]
    fn config_fills_unset_flags() {
        let mut config = AppConfig::default();
        config.workflow.generate = vec!["dvp".to_string(), "crf".to_string()];
        config.workflow.max_pages = Some(12);
        config.workflow.dmp_enabled = true;
        config.style.profile = StyleProfile::Bestat;

        let options = workflow_options(&args(), &config).unwrap();
        assert_eq!(options.kinds, vec![DocumentKind::Crf, DocumentKind::Dvp]);
        assert_eq!(options.max_pages, Some(12));
        assert_eq!(options.style, StyleProfile::Bestat);
        assert!(options.dmp_enabled);
        assert!(options.backup);
    }

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        config.workflow.generate = vec!["crf".to_string()];
        config.workflow.max_pages = Some(12);
        let mut args = args();
        args.generate = vec![GenerateArg::Dmp, GenerateArg::UserGuide];
        args.max_pages = Some(3);
        args.style = Some(StyleArg::Fda);
        args.no_backup = true;

        let options = workflow_options(&args, &config).unwrap();
        assert_eq!(
            options.kinds,
            vec![DocumentKind::UserGuide, DocumentKind::Dmp]
        );
        assert_eq!(options.max_pages, Some(3));
        assert_eq!(options.style, StyleProfile::Fda);
        assert!(!options.backup);
    }

    #[test]
    fn all_wins_over_single_kinds() {
        let mut args = args();
        args.generate = vec![GenerateArg::Crf, GenerateArg::All];
        let options = workflow_options(&args, &AppConfig::default()).unwrap();
        assert_eq!(options.kinds, DocumentKind::ALL.to_vec());
    }
}
