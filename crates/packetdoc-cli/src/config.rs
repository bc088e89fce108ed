//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Environment variables
//! - Command-line arguments

use crate::cli::{Cli, OutputFormat};
use crate::error::{Error, Result};
use packetdoc_schemas::documentation::generator::{DEFAULT_DESCRIPTION_LIMIT, DEFAULT_INDEX_TITLE};
use packetdoc_schemas::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path settings
    pub paths: PathConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Page rendering settings
    pub render: RenderConfig,
}

/// Path configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Directory holding the schema documents
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the generated pages
    pub output_dir: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Summary format when `--output` is not given
    pub format: String,

    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

/// Page rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Heading of the index page
    pub index_title: String,

    /// Description characters kept per index entry
    pub description_limit: usize,

    /// Treat documents that fail to render as a failed run
    pub fail_on_error: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
            progress: true,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            index_title: DEFAULT_INDEX_TITLE.to_string(),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
            fail_on_error: false,
        }
    }
}

/// Configuration file syntax, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_str(&content, FileFormat::from_path(path))
            .map_err(|e| Error::config(format!("Invalid configuration in {}: {}", path.display(), e)))
    }

    fn from_str(content: &str, format: FileFormat) -> std::result::Result<Self, String> {
        match format {
            FileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        match Self::default_config_paths().into_iter().find(|path| path.is_file()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".packetdoc.toml"),
            PathBuf::from(".packetdoc.yaml"),
            PathBuf::from(".packetdoc.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let packetdoc_dir = config_dir.join("packetdoc");
            paths.push(packetdoc_dir.join("config.toml"));
            paths.push(packetdoc_dir.join("config.yaml"));
            paths.push(packetdoc_dir.join("config.json"));
        }

        paths
    }

    /// Summary format from the file, unless the command line chose one
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_name(&self.output.format)
            .ok_or_else(|| Error::config(format!("Unknown output format '{}'", self.output.format)))
    }
}

/// Effective settings of one run, command line over file over defaults
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub fail_on_error: bool,
    pub show_progress: bool,
    pub generator: GeneratorConfig,
}

impl RunSettings {
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let input_dir = cli
            .input_dir
            .clone()
            .or_else(|| config.paths.input_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        let output_dir = cli
            .output_dir
            .clone()
            .or_else(|| config.paths.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("docs"));

        let format = match cli.output {
            Some(format) => format,
            None => config.output_format()?,
        };

        if config.render.description_limit == 0 {
            return Err(Error::config("render.description_limit must be greater than zero"));
        }

        let generator = GeneratorConfig {
            output_dir: output_dir.clone(),
            index_title: cli
                .title
                .clone()
                .unwrap_or_else(|| config.render.index_title.clone()),
            description_limit: config.render.description_limit,
        };

        Ok(Self {
            input_dir,
            output_dir,
            format,
            fail_on_error: cli.fail_on_error || config.render.fail_on_error,
            show_progress: config.output.progress && !cli.quiet,
            generator,
        })
    }
}
