//! JSON formatting for tokens and suggestions
//!
//! - Compact JSON for piping into other tools
//! - Pretty-printed JSON, optionally colored with colored_json

use colored_json::prelude::*;
use serde::Serialize;
use serde_json::{Value, json};

use crate::completion::CompletionItem;
use crate::error::Result;
use crate::lexer::LineTokens;

/// JSON formatter with pretty printing support
pub struct JsonFormatter {
    /// Enable pretty printing
    pretty: bool,

    /// Enable colored output
    use_colors: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool, use_colors: bool) -> Self {
        Self { pretty, use_colors }
    }

    /// One object per line: its tokens (with text) and the state it ends in
    pub fn format_tokens(&self, lines: &[(&str, &LineTokens)]) -> Result<String> {
        let value: Vec<Value> = lines
            .iter()
            .map(|(line, result)| {
                let tokens: Vec<Value> = result
                    .tokens
                    .iter()
                    .map(|token| {
                        json!({
                            "kind": token.kind,
                            "start": token.span.start,
                            "end": token.span.end,
                            "text": token.text(line),
                        })
                    })
                    .collect();
                json!({ "tokens": tokens, "endState": result.end_state.to_string() })
            })
            .collect();
        self.render(&value)
    }

    pub fn format_completions(&self, items: &[CompletionItem]) -> Result<String> {
        self.render(items)
    }

    /// Serialize any value with this formatter's settings
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if !self.pretty {
            return Ok(serde_json::to_string(value)?);
        }

        let json_str = serde_json::to_string_pretty(value)?;
        // Compact JSON stays uncolored for piping
        if self.use_colors {
            Ok(json_str.to_colored_json_auto().unwrap_or(json_str))
        } else {
            Ok(json_str)
        }
    }
}
