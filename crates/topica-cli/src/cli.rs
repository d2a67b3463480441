//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Topica - Split long documents into topic files with an LLM.
#[derive(Debug, Parser)]
#[command(name = "topica")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names only)
    Quiet,
}

/// Chunking presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ContextPreset {
    /// 2000-character chunks
    Default,
    /// 1000-character chunks for tight input limits
    Small,
    /// 6000-character chunks with one retry
    Large,
}

impl From<ContextPreset> for topica_extractor::ExtractorConfig {
    fn from(preset: ContextPreset) -> Self {
        match preset {
            ContextPreset::Default => Self::default(),
            ContextPreset::Small => Self::small_context(),
            ContextPreset::Large => Self::large_context(),
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract topics from every .txt file in a directory
    Run(RunArgs),

    /// Show how a file would be chunked, without calling the service
    Plan(PlanArgs),

    /// Parse saved model output into topics
    Parse(ParseArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Directory of plain-text documents
    pub input_dir: Option<PathBuf>,

    /// Directory receiving topic files
    pub output_dir: Option<PathBuf>,

    /// Where completed documents are moved (default: <input_dir>/done)
    #[arg(long)]
    pub done_dir: Option<PathBuf>,

    /// Start from a preset instead of the [extractor] config section
    #[arg(long, value_enum)]
    pub preset: Option<ContextPreset>,

    /// Chunk length in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters shared between consecutive chunks
    #[arg(long)]
    pub overlap_size: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Retries per chunk after a service failure
    #[arg(long)]
    pub retries: Option<u32>,

    /// Completion service base URL
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,

    /// Model identifier
    #[arg(long, env = "DEFAULT_MODEL")]
    pub model: Option<String>,

    /// API key sent as a bearer token
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Exit with an error if any document failed
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the plan command.
#[derive(Debug, Parser)]
pub struct PlanArgs {
    /// Plain-text document to chunk
    pub file: PathBuf,

    /// Start from a preset instead of the [extractor] config section
    #[arg(long, value_enum)]
    pub preset: Option<ContextPreset>,

    /// Chunk length in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters shared between consecutive chunks
    #[arg(long)]
    pub overlap_size: Option<usize>,
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// File holding raw model output
    pub file: PathBuf,

    /// Write the topics here using the normal file layout
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Source name used in single-file names (default: file stem)
    #[arg(long)]
    pub source_name: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::try_parse_from([
            "topica",
            "run",
            "in",
            "out",
            "--chunk-size",
            "1000",
            "--overlap-size",
            "100",
            "--base-url",
            "http://localhost:8000/v1",
            "--model",
            "m",
            "--fail-fast",
        ])
        .unwrap();

        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.input_dir, Some(PathBuf::from("in")));
                assert_eq!(args.output_dir, Some(PathBuf::from("out")));
                assert_eq!(args.chunk_size, Some(1000));
                assert_eq!(args.overlap_size, Some(100));
                assert_eq!(args.base_url.as_deref(), Some("http://localhost:8000/v1"));
                assert!(args.fail_fast);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["topica", "plan", "doc.txt", "--format", "json", "-v"]).unwrap();
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.verbose);
    }

    #[test]
    fn test_preset_flag() {
        let cli = Cli::try_parse_from(["topica", "plan", "doc.txt", "--preset", "small"]).unwrap();
        match cli.command {
            Command::Plan(args) => assert_eq!(args.preset, Some(ContextPreset::Small)),
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["topica", "plan", "doc.txt", "--preset", "huge"]).is_err());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["topica"]).is_err());
    }
}
