//! ANSI styling of token kinds
//!
//! Shared by the `styled` output format and the REPL highlighter.

use nu_ansi_term::{Color, Style};

use crate::lexer::{Token, TokenKind};

/// Terminal style for a token kind
pub fn style_for(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Keyword => Color::Blue.bold(),
        TokenKind::Operator => Color::Purple.into(),
        TokenKind::String => Color::Yellow.into(),
        TokenKind::Number => Color::Cyan.into(),
        TokenKind::Identifier => Color::Green.into(),
        TokenKind::Bracket => Color::LightCyan.into(),
        TokenKind::Delimiter => Color::DarkGray.into(),
        TokenKind::Invalid => Color::Red.underline(),
        TokenKind::Whitespace | TokenKind::Unstyled => Style::default(),
    }
}

/// Render `line` with each token painted in its style
pub fn paint_line(line: &str, tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| style_for(token.kind).paint(token.text(line)).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Dialect;

    #[test]
    fn test_unstyled_kinds_are_plain() {
        assert_eq!(style_for(TokenKind::Unstyled), Style::default());
        assert_eq!(style_for(TokenKind::Whitespace), Style::default());
        assert_ne!(style_for(TokenKind::Invalid), Style::default());
    }

    #[test]
    fn test_paint_line_keeps_text() {
        let line = "a#b _and_ c";
        let tokens = Dialect::Klogs.tokenizer().unwrap().tokenize(line);
        let painted = paint_line(line, &tokens);
        assert!(painted.contains("#"));
        assert!(painted.contains("\u{1b}["));
    }
}
