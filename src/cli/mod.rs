//! Command-line interface for kobs-querylang
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - The one-shot subcommands (tokenize, highlight, complete, export)

pub mod completion;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

use crate::completion::{CompletionProvider, FieldLoader, FileFieldLoader, StaticFieldLoader};
use crate::config::{Config, LogLevel, OutputFormat};
use crate::error::{ConfigError, Result};
use crate::formatter::{Formatter, paint_line};
use crate::lexer::Dialect;
use crate::registry::{LanguageConfiguration, MonarchGrammar};

const DIALECT_NAMES: [&str; 5] = ["klogs", "mongodb", "mongo", "signalsciences", "sigsci"];
const FORMAT_NAMES: [&str; 4] = ["table", "json", "json-pretty", "styled"];

/// Query language tooling for the kobs klogs, MongoDB and Signal Sciences editors
#[derive(Parser, Debug)]
#[command(
    name = "kobs-querylang",
    version,
    about = "Tokenize, highlight and complete kobs query languages",
    long_about = "Lexers and completion catalogs for the klogs, MongoDB and Signal Sciences
query languages, with an interactive editor and a grammar exporter."
)]
pub struct CliArgs {
    /// Query dialect
    #[arg(short = 'l', long, value_name = "DIALECT", value_parser = DIALECT_NAMES)]
    pub dialect: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format (table, json, json-pretty, styled)
    #[arg(long, value_name = "FORMAT", value_parser = FORMAT_NAMES)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Field name offered as a klogs completion (repeatable)
    #[arg(long = "field", value_name = "NAME")]
    pub fields: Vec<String>,

    /// File with one klogs field name per line
    #[arg(long, value_name = "FILE")]
    pub fields_file: Option<PathBuf>,

    /// Field loader timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub loader_timeout: Option<u64>,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for kobs-querylang
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tokens of a query
    Tokenize {
        /// Query text; read from stdin when omitted
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Read the query from a file
        #[arg(short = 'f', long, value_name = "FILE", conflicts_with = "query")]
        file: Option<PathBuf>,
    },

    /// Print a query with syntax highlighting
    Highlight {
        /// Query text; read from stdin when omitted
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Read the query from a file
        #[arg(short = 'f', long, value_name = "FILE", conflicts_with = "query")]
        file: Option<PathBuf>,
    },

    /// List completion suggestions
    Complete {
        /// Only show suggestions starting with this prefix
        #[arg(value_name = "PREFIX", default_value = "")]
        prefix: String,
    },

    /// Print the dialect's grammar as Monarch JSON
    Export {
        /// Print the bracket and auto-closing configuration instead
        #[arg(long)]
        configuration: bool,
    },

    /// Start the interactive editor
    Repl,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Show version information
    Version,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args)?;
        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Dialect to work with
    ///
    /// Priority:
    /// 1. --dialect/-l command line argument
    /// 2. `editor.default_dialect` from the configuration
    pub fn dialect(&self) -> Result<Dialect> {
        match &self.args.dialect {
            Some(name) => name.parse(),
            None => Ok(self.config.editor.default_dialect),
        }
    }

    /// Field loader from the completion configuration, if any fields are set
    ///
    /// A fields file takes precedence over inline field names.
    pub fn field_loader(&self) -> Option<Arc<dyn FieldLoader>> {
        let completion = &self.config.completion;
        if let Some(path) = &completion.fields_file {
            return Some(Arc::new(FileFieldLoader::new(path.clone())));
        }
        if !completion.fields.is_empty() {
            return Some(Arc::new(StaticFieldLoader::new(completion.fields.clone())));
        }
        None
    }

    /// Apply CLI arguments to configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) -> Result<()> {
        Self::apply_display_args(config, args)?;
        Self::apply_logging_args(config, args);
        Self::apply_completion_args(config, args)
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) -> Result<()> {
        if let Some(format_str) = &args.format {
            config.display.format = Self::parse_output_format(format_str)?;
        }

        if args.no_color {
            config.display.color_output = false;
        }
        Ok(())
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Apply completion-related CLI arguments to configuration
    fn apply_completion_args(config: &mut Config, args: &CliArgs) -> Result<()> {
        if !args.fields.is_empty() {
            config.completion.fields = args.fields.clone();
        }
        if let Some(path) = &args.fields_file {
            config.completion.fields_file = Some(path.clone());
        }
        if let Some(timeout) = args.loader_timeout {
            if timeout == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "--loader-timeout".to_string(),
                    value: "0".to_string(),
                }
                .into());
            }
            config.completion.loader_timeout_ms = timeout;
        }
        Ok(())
    }

    /// Parse output format string
    fn parse_output_format(format_str: &str) -> Result<OutputFormat> {
        match format_str.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Ok(OutputFormat::JsonPretty),
            "styled" => Ok(OutputFormat::Styled),
            _ => Err(ConfigError::InvalidValue {
                field: "--format".to_string(),
                value: format_str.to_string(),
            }
            .into()),
        }
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to start the REPL
    pub async fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Tokenize { query, file }) => {
                let text = read_input(query.as_deref(), file.as_ref()).await?;
                println!("{}", self.tokenize(&text)?);
                Ok(true)
            }
            Some(Commands::Highlight { query, file }) => {
                let text = read_input(query.as_deref(), file.as_ref()).await?;
                println!("{}", self.highlight(&text)?);
                Ok(true)
            }
            Some(Commands::Complete { prefix }) => {
                println!("{}", self.complete(prefix).await?);
                Ok(true)
            }
            Some(Commands::Export { configuration }) => {
                println!("{}", self.export(*configuration)?);
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Repl) | None => Ok(false),
        }
    }

    /// Tokens of every line of `text` in the configured format
    pub fn tokenize(&self, text: &str) -> Result<String> {
        let tokenizer = self.dialect()?.tokenizer()?;
        let lines: Vec<_> = text
            .lines()
            .zip(tokenizer.tokenize_document(text))
            .collect();
        Formatter::from_config(&self.config.display).format_tokens(&lines)
    }

    /// `text` painted by token kind; plain when color is off
    pub fn highlight(&self, text: &str) -> Result<String> {
        let tokenizer = self.dialect()?.tokenizer()?;
        if !self.config.display.color_output {
            return Ok(text.trim_end_matches('\n').to_string());
        }
        Ok(text
            .lines()
            .zip(tokenizer.tokenize_document(text))
            .map(|(line, result)| paint_line(line, &result.tokens))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Suggestions starting with `prefix`, loaded fields included
    pub async fn complete(&self, prefix: &str) -> Result<String> {
        let dialect = self.dialect()?;
        let ignore_case = dialect.definition()?.ignore_case();
        let provider = CompletionProvider::new(dialect).with_timeout(self.config.loader_timeout());
        let loader = self.field_loader();

        let items: Vec<_> = provider
            .suggestions(loader.as_deref())
            .await
            .into_iter()
            .filter(|item| item.matches_prefix(prefix, ignore_case))
            .collect();
        Formatter::from_config(&self.config.display).format_completions(&items)
    }

    /// Monarch grammar, or the language configuration, as pretty JSON
    pub fn export(&self, configuration: bool) -> Result<String> {
        let definition = self.dialect()?.definition()?;
        if configuration {
            let conf = LanguageConfiguration::from_definition(&definition);
            return Ok(serde_json::to_string_pretty(&conf)?);
        }
        MonarchGrammar::from_definition(&definition).to_json_pretty()
    }

    /// Show version information
    fn show_version(&self) {
        println!("kobs-querylang version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
        let dialects: Vec<&str> = Dialect::ALL.iter().map(|d| d.id()).collect();
        println!("Dialects: {}", dialects.join(", "));
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("❌ Configuration file does not exist");
            return;
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("✅ Configuration is valid"),
                Err(e) => println!("❌ Configuration validation failed: {}", e),
            },
            Err(e) => println!("❌ Failed to load configuration: {}", e),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Print banner with version and dialect
    pub fn print_banner(&self, dialect: Dialect) {
        if !self.args.quiet {
            println!("kobs-querylang {} ({})", env!("CARGO_PKG_VERSION"), dialect);
            println!("Type :help for commands, :quit to leave.");
        }
    }
}

/// Query text from the argument, a file, or stdin, in that order
async fn read_input(query: Option<&str>, file: Option<&PathBuf>) -> Result<String> {
    if let Some(query) = query {
        return Ok(query.to_string());
    }
    if let Some(path) = file {
        return Ok(tokio::fs::read_to_string(path).await?);
    }
    let mut text = String::new();
    tokio::io::stdin().read_to_string(&mut text).await?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryLangError;

    fn cli(argv: &[&str]) -> CliInterface {
        let args = CliArgs::try_parse_from(argv.iter().copied()).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args).unwrap();
        CliInterface { args, config }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(["kobs-querylang"]).unwrap();
        assert!(args.dialect.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args =
            CliArgs::try_parse_from(["kobs-querylang", "--no-color", "--quiet", "-l", "sigsci"])
                .unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
        assert_eq!(args.dialect.as_deref(), Some("sigsci"));
    }

    #[test]
    fn test_unknown_dialect_rejected_by_parser() {
        assert!(CliArgs::try_parse_from(["kobs-querylang", "-l", "sql"]).is_err());
    }

    #[test]
    fn test_dialect_priority() {
        assert_eq!(cli(&["kobs-querylang"]).dialect().unwrap(), Dialect::Klogs);
        assert_eq!(
            cli(&["kobs-querylang", "--dialect", "mongo"]).dialect().unwrap(),
            Dialect::MongoDb
        );
    }

    #[test]
    fn test_args_override_config() {
        let cli = cli(&[
            "kobs-querylang",
            "--format",
            "json",
            "--no-color",
            "--vv",
            "--field",
            "app",
            "--field",
            "pod",
            "--loader-timeout",
            "50",
        ]);
        assert_eq!(cli.config().display.format, OutputFormat::Json);
        assert!(!cli.config().display.color_output);
        assert_eq!(cli.config().logging.level, LogLevel::Trace);
        assert_eq!(cli.config().completion.fields, vec!["app", "pod"]);
        assert_eq!(cli.config().completion.loader_timeout_ms, 50);
        assert!(cli.field_loader().is_some());
    }

    #[test]
    fn test_zero_loader_timeout_rejected() {
        let args =
            CliArgs::try_parse_from(["kobs-querylang", "--loader-timeout", "0"]).unwrap();
        let mut config = Config::default();
        let err = CliInterface::apply_args_to_config(&mut config, &args).unwrap_err();
        assert!(matches!(err, QueryLangError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_tokenize_json() {
        let cli = cli(&["kobs-querylang", "--format", "json", "tokenize", "x"]);
        let output = cli.tokenize("a='b\nc'").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["endState"], "root.string");
        assert_eq!(parsed[1]["tokens"][0]["kind"], "string");
    }

    #[test]
    fn test_highlight_without_color() {
        let cli = cli(&["kobs-querylang", "--no-color"]);
        assert_eq!(cli.highlight("a = 'b'\n").unwrap(), "a = 'b'");
    }

    #[tokio::test]
    async fn test_complete_with_prefix() {
        let cli = cli(&["kobs-querylang", "--format", "json", "--field", "_app"]);
        let output = cli.complete("_A").await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let labels: Vec<&str> = parsed
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["_and_", "_AND_", "_app"]);
    }

    #[tokio::test]
    async fn test_complete_mongodb_ignores_fields() {
        let cli = cli(&[
            "kobs-querylang",
            "-l",
            "mongodb",
            "--format",
            "json",
            "--field",
            "$custom",
        ]);
        let output = cli.complete("$custom").await.unwrap();
        assert_eq!(output, "[]");
    }

    #[test]
    fn test_export_grammar_and_configuration() {
        let cli = cli(&["kobs-querylang", "-l", "mongodb"]);
        let grammar: serde_json::Value = serde_json::from_str(&cli.export(false).unwrap()).unwrap();
        assert_eq!(grammar["ignoreCase"], false);
        let conf: serde_json::Value = serde_json::from_str(&cli.export(true).unwrap()).unwrap();
        assert!(conf["autoClosingPairs"].is_array());
    }
}
