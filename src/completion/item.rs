//! Completion entries handed to the editor host

use serde::Serialize;
use std::fmt;

/// Kind of a completion entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompletionKind {
    Operator,
    Variable,
    Keyword,
    Value,
}

impl fmt::Display for CompletionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompletionKind::Operator => "Operator",
            CompletionKind::Variable => "Variable",
            CompletionKind::Keyword => "Keyword",
            CompletionKind::Value => "Value",
        };
        f.write_str(name)
    }
}

/// A single suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    /// Text shown in the suggestion list
    pub label: String,
    /// Text inserted when the suggestion is accepted
    pub insert_text: String,
    pub kind: CompletionKind,
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, insert_text: impl Into<String>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            insert_text: insert_text.into(),
            kind,
        }
    }

    /// Entry whose insertion text equals its label
    pub fn plain(label: impl Into<String>, kind: CompletionKind) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
        }
    }

    /// Whether the label starts with `prefix`
    pub fn matches_prefix(&self, prefix: &str, ignore_case: bool) -> bool {
        if ignore_case {
            self.label.to_lowercase().starts_with(&prefix.to_lowercase())
        } else {
            self.label.starts_with(prefix)
        }
    }
}
