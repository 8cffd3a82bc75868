//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ctdoc_model::DocumentKind;
use ctdoc_output::StyleProfile;

#[derive(Parser)]
#[command(
    name = "ctdoc",
    version,
    about = "Clinical document automation - CRF, DVP, User Guide and DMP from a protocol",
    long_about = "Generate clinical trial study documents from a protocol.\n\n\
                  Parses protocol metadata, then writes a Case Report Form, a Data\n\
                  Validation Plan with its rule exports, an EDC User Guide and a\n\
                  Data Management Plan, with a JSON and text run report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: ./ctdoc.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate documents for one protocol.
    Run(RunArgs),

    /// Generate documents for several protocols, each in its own folder.
    Batch(BatchArgs),

    /// Print the validation rules generated from a field catalogue.
    Rules(RulesArgs),

    /// List the standard CRF domains.
    Domains,
}

#[derive(Args)]
pub struct RunArgs {
    /// Protocol document (PDF, text or JSON).
    #[arg(value_name = "PROTOCOL")]
    pub protocol: PathBuf,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Protocol documents to process in order.
    #[arg(value_name = "PROTOCOL", required = true, num_args = 1..)]
    pub protocols: Vec<PathBuf>,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

/// Flags shared by `run` and `batch`.
#[derive(Args)]
pub struct GenerateArgs {
    /// Output directory. For `run` the default is output_<stem>_<timestamp>;
    /// for `batch` it is the base folder (default: batch_output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Documents to generate (default: all).
    #[arg(long = "generate", value_enum, value_delimiter = ',')]
    pub generate: Vec<GenerateArg>,

    /// Overwrite existing documents without copying them to _backup/.
    #[arg(long = "no-backup")]
    pub no_backup: bool,

    /// Field catalogue (JSON or TOML) with fields, custom rules and custom
    /// CRF domains.
    #[arg(long = "fields", value_name = "FILE")]
    pub fields: Option<PathBuf>,

    /// Maximum number of protocol pages to read.
    #[arg(long = "max-pages", value_name = "N")]
    pub max_pages: Option<usize>,

    /// Document style profile.
    #[arg(long = "style", value_enum, value_name = "PROFILE")]
    pub style: Option<StyleArg>,

    /// Build the Data Management Plan instead of recording it as not
    /// implemented.
    #[arg(long = "enable-dmp")]
    pub enable_dmp: bool,

    /// API key for parsers backed by an external extraction service.
    #[arg(long = "api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Args)]
pub struct RulesArgs {
    /// Field catalogue (default: the standard validation fields).
    #[arg(long = "fields", value_name = "FILE")]
    pub fields: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: RulesFormatArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GenerateArg {
    Crf,
    Dvp,
    #[value(alias = "user_guide")]
    UserGuide,
    Dmp,
    All,
}

impl GenerateArg {
    /// `None` for `all`.
    pub fn kind(self) -> Option<DocumentKind> {
        match self {
            GenerateArg::Crf => Some(DocumentKind::Crf),
            GenerateArg::Dvp => Some(DocumentKind::Dvp),
            GenerateArg::UserGuide => Some(DocumentKind::UserGuide),
            GenerateArg::Dmp => Some(DocumentKind::Dmp),
            GenerateArg::All => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    Standard,
    Fda,
    Bestat,
}

impl From<StyleArg> for StyleProfile {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Standard => StyleProfile::Standard,
            StyleArg::Fda => StyleProfile::Fda,
            StyleArg::Bestat => StyleProfile::Bestat,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RulesFormatArg {
    Table,
    Json,
    Csv,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(error) => panic!("{error}"),
        }
    }

    #[test]
    fn generate_accepts_lists_and_repeats() {
        let cli = parse(&[
            "ctdoc",
            "run",
            "protocol.pdf",
            "--generate",
            "crf,dvp",
            "--generate",
            "user_guide",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(
            args.generate.generate,
            vec![GenerateArg::Crf, GenerateArg::Dvp, GenerateArg::UserGuide]
        );
        assert!(!args.generate.no_backup);
    }

    #[test]
    fn batch_requires_a_protocol() {
        assert!(Cli::try_parse_from(["ctdoc", "batch"]).is_err());
        let cli = parse(&["ctdoc", "batch", "a.pdf", "b.pdf", "--style", "fda"]);
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.protocols.len(), 2);
        assert_eq!(args.generate.style, Some(StyleArg::Fda));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["ctdoc", "domains", "--log-level", "debug", "--config", "x.toml"]);
        assert!(matches!(cli.command, Command::Domains));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn rules_defaults_to_table() {
        let cli = parse(&["ctdoc", "rules"]);
        let Command::Rules(args) = cli.command else {
            panic!("expected rules");
        };
        assert_eq!(args.format, RulesFormatArg::Table);
        assert!(args.fields.is_none());
    }

    #[test]
    fn all_maps_to_no_single_kind() {
        assert_eq!(GenerateArg::All.kind(), None);
        assert_eq!(GenerateArg::Dmp.kind(), Some(DocumentKind::Dmp));
    }
}
