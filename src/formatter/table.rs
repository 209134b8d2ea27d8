//! Table formatting using tabled
//!
//! One row per token (line, index, kind, byte span, text) or per suggestion
//! (label, insertion text, kind).

use tabled::{
    Table, Tabled,
    settings::{Modify, Style, Width, object::Columns},
};

use crate::completion::CompletionItem;
use crate::lexer::Token;

/// Maximum width for the text column (characters)
const DEFAULT_MAX_TEXT_WIDTH: usize = 60;

#[derive(Tabled)]
struct TokenRow {
    line: usize,
    #[tabled(rename = "#")]
    index: usize,
    kind: String,
    span: String,
    text: String,
}

#[derive(Tabled)]
struct CompletionRow {
    label: String,
    #[tabled(rename = "insert")]
    insert_text: String,
    kind: String,
}

/// Table formatter for tokens and suggestions
pub struct TableFormatter {
    max_text_width: usize,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            max_text_width: DEFAULT_MAX_TEXT_WIDTH,
        }
    }

    /// Rows for the tokens of each `(line, tokens)` pair, lines numbered from 1
    pub fn format_tokens(&self, lines: &[(&str, &[Token])]) -> String {
        let rows = lines.iter().enumerate().flat_map(|(line_no, (line, tokens))| {
            tokens.iter().enumerate().map(move |(i, token)| TokenRow {
                line: line_no + 1,
                index: i,
                kind: token.kind.to_string(),
                span: format!("{}..{}", token.span.start, token.span.end),
                text: format!("{:?}", token.text(line)),
            })
        });

        let mut table = Table::new(rows);
        table.with(Style::modern()).with(
            Modify::new(Columns::new(4..=4))
                .with(Width::truncate(self.max_text_width).suffix("...")),
        );
        table.to_string()
    }

    pub fn format_completions(&self, items: &[CompletionItem]) -> String {
        let rows = items.iter().map(|item| CompletionRow {
            label: item.label.clone(),
            insert_text: item.insert_text.clone(),
            kind: item.kind.to_string(),
        });

        let mut table = Table::new(rows);
        table.with(Style::modern());
        table.to_string()
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CompletionKind;
    use crate::lexer::Dialect;

    #[test]
    fn test_token_table() {
        let line = "a=~'x'";
        let tokens = Dialect::Klogs.tokenizer().unwrap().tokenize(line);
        let output = TableFormatter::new().format_tokens(&[(line, &tokens[..])]);
        assert!(output.contains("operator"));
        assert!(output.contains("\"=~\""));
        assert!(output.contains("1..3"));
    }

    #[test]
    fn test_completion_table() {
        let items = vec![CompletionItem::new("$eq", "\\$eq", CompletionKind::Operator)];
        let output = TableFormatter::new().format_completions(&items);
        assert!(output.contains("\\$eq"));
        assert!(output.contains("Operator"));
    }

    #[test]
    fn test_long_text_is_truncated() {
        let line = format!("'{}'", "x".repeat(80));
        let tokens = Dialect::Klogs.tokenizer().unwrap().tokenize(&line);
        let formatter = TableFormatter { max_text_width: 12 };
        let output = formatter.format_tokens(&[(line.as_str(), &tokens[..])]);
        assert!(output.contains("..."));
        assert!(!output.contains(&"x".repeat(20)));
        assert!(output.contains("0..82"));
    }
}

