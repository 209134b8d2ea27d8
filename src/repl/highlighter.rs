//! Syntax highlighter for query input
//!
//! Runs the active dialect's tokenizer over the line and paints every token
//! with the style of its kind.

use nu_ansi_term::Style;
use reedline::{Highlighter, StyledText};

use super::shared_state::SharedState;
use crate::formatter::style_for;

/// Reedline highlighter backed by the dialect tokenizer
pub struct QueryHighlighter {
    shared_state: SharedState,
    enabled: bool,
}

impl QueryHighlighter {
    pub fn new(shared_state: SharedState, enabled: bool) -> Self {
        Self {
            shared_state,
            enabled,
        }
    }
}

impl Highlighter for QueryHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        // Editor commands are not queries
        if !self.enabled || line.trim_start().starts_with(':') {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let tokenizer = self.shared_state.tokenizer();
        for token in tokenizer.tokenize(line) {
            styled.push((style_for(token.kind), token.text(line).to_string()));
        }
        styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::lexer::{Dialect, TokenKind};
    use std::sync::Arc;

    fn highlighter(dialect: Dialect, enabled: bool) -> QueryHighlighter {
        let tokenizer = Arc::new(dialect.tokenizer().unwrap());
        QueryHighlighter::new(
            SharedState::with_config(dialect, tokenizer, &DisplayConfig::default()),
            enabled,
        )
    }

    fn text_of(styled: &StyledText) -> String {
        styled.buffer.iter().map(|(_, s)| s.as_str()).collect()
    }

    #[test]
    fn test_segments_cover_line() {
        let line = "namespace='kube-system' _and_ count>=10";
        let styled = highlighter(Dialect::Klogs, true).highlight(line, 0);
        assert_eq!(text_of(&styled), line);
        assert!(styled.buffer.len() > 1);
    }

    #[test]
    fn test_keyword_style() {
        let styled = highlighter(Dialect::Klogs, true).highlight("_AND_", 0);
        assert_eq!(styled.buffer.len(), 1);
        assert_eq!(styled.buffer[0].0, style_for(TokenKind::Keyword));
    }

    #[test]
    fn test_disabled_is_plain() {
        let styled = highlighter(Dialect::MongoDb, false).highlight("{ $eq: 1 }", 0);
        assert_eq!(styled.buffer.len(), 1);
        assert_eq!(styled.buffer[0].0, Style::default());
    }

    #[test]
    fn test_editor_command_is_plain() {
        let styled = highlighter(Dialect::Klogs, true).highlight(":dialect mongodb", 0);
        assert_eq!(text_of(&styled), ":dialect mongodb");
        assert_eq!(styled.buffer.len(), 1);
    }
}
