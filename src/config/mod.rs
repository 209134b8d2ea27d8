//! Configuration management for kobs-querylang
//!
//! This module handles loading, parsing, and saving configuration:
//! - Configuration files (TOML format)
//! - Command-line arguments (applied by the CLI on top of the file)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::lexer::Dialect;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Editor configuration
    #[serde(default)]
    pub editor: EditorConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Completion configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Editor defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Dialect used when none is given on the command line
    #[serde(default = "default_dialect")]
    pub default_dialect: Dialect,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Output format (table, json, json-pretty, styled)
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Enable syntax highlighting in the REPL
    #[serde(default = "default_syntax_highlighting")]
    pub syntax_highlighting: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One row per token or suggestion
    Table,

    /// Compact JSON (single-line), suitable for piping
    Json,

    /// Pretty-printed JSON
    JsonPretty,

    /// The input line rendered with ANSI colors
    Styled,
}

/// Dynamic completion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Time a field loader may take, in milliseconds
    #[serde(default = "default_loader_timeout_ms")]
    pub loader_timeout_ms: u64,

    /// Field names always offered for klogs
    #[serde(default)]
    pub fields: Vec<String>,

    /// File with one field name per line
    #[serde(default)]
    pub fields_file: Option<PathBuf>,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_dialect() -> Dialect {
    Dialect::Klogs
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_color_output() -> bool {
    true
}

fn default_syntax_highlighting() -> bool {
    true
}

fn default_loader_timeout_ms() -> u64 {
    2000
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kobs_querylang_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_dialect: default_dialect(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color_output: default_color_output(),
            syntax_highlighting: default_syntax_highlighting(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            loader_timeout_ms: default_loader_timeout_ms(),
            fields: Vec::new(),
            fields_file: None,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file, or the default path when `path` is `None`
    ///
    /// A missing file at the default path yields the default configuration;
    /// a missing file that was asked for explicitly is an error.
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let explicit = path.is_some();
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !path.exists() {
            if explicit {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".kobs-querylang")
            .join("config.toml")
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a file, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.completion.loader_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "completion.loader_timeout_ms".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if self.history.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if let Some(field) = self.completion.fields.iter().find(|f| f.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "completion.fields".to_string(),
                value: format!("{field:?}"),
            }
            .into());
        }
        Ok(())
    }

    /// Get the loader timeout as Duration
    pub fn loader_timeout(&self) -> Duration {
        Duration::from_millis(self.completion.loader_timeout_ms)
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl OutputFormat {
    /// Check if format is JSON-based
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::JsonPretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryLangError;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor.default_dialect, Dialect::Klogs);
        assert_eq!(config.display.format, OutputFormat::Table);
        assert!(config.display.color_output);
        assert_eq!(config.loader_timeout(), Duration::from_millis(2000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
            [editor]
            default_dialect = "mongodb"

            [display]
            format = "json-pretty"

            [completion]
            fields = ["namespace", "app"]
            "#,
        )
        .unwrap();
        assert_eq!(config.editor.default_dialect, Dialect::MongoDb);
        assert_eq!(config.display.format, OutputFormat::JsonPretty);
        assert!(config.display.color_output);
        assert_eq!(config.completion.fields, vec!["namespace", "app"]);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[display]\nformat = \"xml\"").unwrap_err();
        assert!(matches!(err, QueryLangError::Config(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.completion.loader_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir()
            .join(format!("kobs-querylang-config-{}", std::process::id()))
            .join("config.toml");
        let mut config = Config::default();
        config.editor.default_dialect = Dialect::SignalSciences;
        config.save(&path).unwrap();

        let loaded = Config::load_from_file(Some(&path)).unwrap();
        assert_eq!(loaded.editor.default_dialect, Dialect::SignalSciences);

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = Config::load_from_file(Some(Path::new("/nonexistent/config.toml"))).unwrap_err();
        assert!(matches!(err, QueryLangError::Config(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_output_format_checks() {
        assert!(OutputFormat::JsonPretty.is_json());
        assert!(!OutputFormat::Table.is_json());
    }
}
