//! Configuration management for the CLI.

use crate::cli::{ContextPreset, RunArgs};
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use topica_extractor::ExtractorConfig;
use topica_writer::WriterConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion service connection
    #[serde(default)]
    pub service: ServiceSettings,

    /// Chunking, timeout and retry settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Output layout settings
    #[serde(default)]
    pub writer: WriterConfig,

    /// Default directories
    #[serde(default)]
    pub paths: PathSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Completion service connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Base URL, e.g. `http://localhost:8000/v1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Model identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Optional bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Default directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Where documents are read from
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Where topic files are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Where completed documents go; `<input_dir>/done` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_dir: Option<PathBuf>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Connection details with every required field present.
#[derive(Debug, Clone)]
pub struct ResolvedService {
    /// Base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Optional bearer token
    pub api_key: Option<String>,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".topica").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path is optional and a
    /// missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None => match Self::path() {
                Ok(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the nested sections.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate().map_err(CliError::Config)?;
        self.writer.validate().map_err(CliError::Config)?;
        Ok(())
    }

    /// Apply command-line and environment overrides from `topica run`.
    pub fn apply_run_overrides(&mut self, args: &RunArgs) -> Result<()> {
        if let Some(dir) = &args.input_dir {
            self.paths.input_dir = dir.clone();
        }
        if let Some(dir) = &args.output_dir {
            self.paths.output_dir = dir.clone();
        }
        if let Some(dir) = &args.done_dir {
            self.paths.done_dir = Some(dir.clone());
        }
        self.apply_chunking_overrides(args.preset, args.chunk_size, args.overlap_size);
        if let Some(secs) = args.timeout_secs {
            self.extractor.request_timeout_secs = secs;
        }
        if let Some(retries) = args.retries {
            self.extractor.chunk_retries = retries;
        }
        if let Some(url) = &args.base_url {
            self.service.base_url = Some(url.clone());
        }
        if let Some(model) = &args.model {
            self.service.model = Some(model.clone());
        }
        if let Some(key) = &args.api_key {
            self.service.api_key = Some(key.clone());
        }
        self.validate()
    }

    /// Replace the extractor section with a preset, then override chunk and
    /// overlap sizes when given.
    pub fn apply_chunking_overrides(
        &mut self,
        preset: Option<ContextPreset>,
        chunk_size: Option<usize>,
        overlap_size: Option<usize>,
    ) {
        if let Some(preset) = preset {
            self.extractor = preset.into();
        }
        if let Some(size) = chunk_size {
            self.extractor.chunk_size = size;
        }
        if let Some(size) = overlap_size {
            self.extractor.overlap_size = size;
        }
    }

    /// Directory completed documents are moved into.
    pub fn done_dir(&self) -> PathBuf {
        self.paths
            .done_dir
            .clone()
            .unwrap_or_else(|| self.paths.input_dir.join("done"))
    }

    /// Connection details, failing if the base URL or model is missing.
    pub fn resolve_service(&self) -> Result<ResolvedService> {
        let base_url = non_empty(self.service.base_url.as_deref()).ok_or_else(|| {
            CliError::Config("No base URL configured (set OPENAI_BASE_URL or --base-url)".into())
        })?;
        let model = non_empty(self.service.model.as_deref()).ok_or_else(|| {
            CliError::Config("No model configured (set DEFAULT_MODEL or --model)".into())
        })?;

        Ok(ResolvedService {
            base_url: base_url.to_string(),
            model: model.to_string(),
            api_key: non_empty(self.service.api_key.as_deref()).map(str::to_string),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            done_dir: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("input_data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("extracted_topics")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["run"];
        argv.extend_from_slice(extra);
        RunArgs::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.paths.input_dir, PathBuf::from("input_data"));
        assert_eq!(config.paths.output_dir, PathBuf::from("extracted_topics"));
        assert_eq!(config.done_dir(), PathBuf::from("input_data").join("done"));
        assert_eq!(config.extractor.chunk_size, 2000);
        assert_eq!(config.writer.single_file_threshold, 1800);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [service]
            base_url = "http://localhost:8000/v1"
            model = "local"

            [extractor]
            chunk_size = 1000
            overlap_size = 100

            [paths]
            done_dir = "archive"
            "#,
        )
        .unwrap();

        assert_eq!(config.extractor.chunk_size, 1000);
        assert_eq!(config.extractor.request_timeout_secs, 150);
        assert_eq!(config.paths.input_dir, PathBuf::from("input_data"));
        assert_eq!(config.done_dir(), PathBuf::from("archive"));
        assert_eq!(config.resolve_service().unwrap().model, "local");
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config: Config = toml::from_str("[extractor]\nchunk_size = 1000\noverlap_size = 100\n").unwrap();
        let args = run_args(&["docs", "--chunk-size", "500", "--model", "m", "--base-url", "http://x/v1"]);

        config.apply_run_overrides(&args).unwrap();

        assert_eq!(config.extractor.chunk_size, 500);
        assert_eq!(config.extractor.overlap_size, 100);
        assert_eq!(config.paths.input_dir, PathBuf::from("docs"));
        assert_eq!(config.done_dir(), PathBuf::from("docs").join("done"));
        let service = config.resolve_service().unwrap();
        assert_eq!(service.base_url, "http://x/v1");
    }

    #[test]
    fn test_preset_then_flags() {
        let mut config: Config = toml::from_str("[extractor]\nchunk_size = 1000\noverlap_size = 100\nchunk_retries = 4\n").unwrap();
        let args = run_args(&["--preset", "large", "--overlap-size", "300"]);

        config.apply_run_overrides(&args).unwrap();

        assert_eq!(config.extractor.chunk_size, 6000);
        assert_eq!(config.extractor.overlap_size, 300);
        assert_eq!(config.extractor.chunk_retries, 1);
        assert_eq!(config.extractor.request_timeout_secs, 300);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut config = Config::default();
        let args = run_args(&["--chunk-size", "100", "--overlap-size", "100"]);
        assert!(matches!(config.apply_run_overrides(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn test_missing_service_settings() {
        let mut config = Config::default();
        assert!(config.resolve_service().is_err());

        config.service.base_url = Some("http://x".into());
        config.service.model = Some("  ".into());
        assert!(matches!(config.resolve_service(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let result = Config::load(Some(Path::new("/nonexistent/topica.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
