//! Output formatting for the command-line tools
//!
//! This module renders tokenizer and completion results:
//! - Table formatting (one row per token or suggestion)
//! - JSON formatting (plain and pretty-printed)
//! - Styled output (the query itself, colored by token kind)

pub mod json;
pub mod styled;
pub mod table;

pub use json::JsonFormatter;
pub use styled::{paint_line, style_for};
pub use table::TableFormatter;

use crate::completion::CompletionItem;
use crate::config::{DisplayConfig, OutputFormat};
use crate::error::Result;
use crate::lexer::LineTokens;

/// Main formatter dispatching on the configured output format
pub struct Formatter {
    /// Output format type
    format_type: OutputFormat,

    /// Enable colored output
    use_colors: bool,
}

impl Formatter {
    pub fn new(format_type: OutputFormat, use_colors: bool) -> Self {
        Self {
            format_type,
            use_colors,
        }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.format, config.color_output)
    }

    /// Format the tokenized lines of a document
    pub fn format_tokens(&self, lines: &[(&str, LineTokens)]) -> Result<String> {
        match self.format_type {
            OutputFormat::Table => {
                let rows: Vec<(&str, &[crate::lexer::Token])> = lines
                    .iter()
                    .map(|(line, result)| (*line, result.tokens.as_slice()))
                    .collect();
                Ok(TableFormatter::new().format_tokens(&rows))
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let rows: Vec<(&str, &LineTokens)> =
                    lines.iter().map(|(line, result)| (*line, result)).collect();
                JsonFormatter::new(self.format_type == OutputFormat::JsonPretty, self.use_colors)
                    .format_tokens(&rows)
            }
            OutputFormat::Styled => Ok(lines
                .iter()
                .map(|(line, result)| {
                    if self.use_colors {
                        paint_line(line, &result.tokens)
                    } else {
                        line.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a completion list; `styled` falls back to one label per line
    pub fn format_completions(&self, items: &[CompletionItem]) -> Result<String> {
        match self.format_type {
            OutputFormat::Table => Ok(TableFormatter::new().format_completions(items)),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                JsonFormatter::new(self.format_type == OutputFormat::JsonPretty, self.use_colors)
                    .format_completions(items)
            }
            OutputFormat::Styled => Ok(items
                .iter()
                .map(|item| item.insert_text.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }
}
