//! Tokenizer driver
//!
//! Runs a [`LanguageDefinition`] over one line at a time, the way an editor
//! host asks for it.
//!
//! # Design Principles
//!
//! - **Never panic** - every byte of the line ends up in exactly one token
//! - **Never reject input** - a position no rule matches becomes a one-character `Invalid` token
//! - **First match wins** - rules are tried in declaration order, not by longest match
//! - **Carry state across lines** - an unterminated string continues on the next line

use std::fmt;

use serde::Serialize;
use tracing::trace;

use super::definition::{LanguageDefinition, ROOT_STATE};
use super::rule::Transition;
use super::token::{Token, TokenKind};

/// LIFO stack of active state names, root at the bottom
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateStack(Vec<String>);

impl StateStack {
    /// Stack holding only the root state
    pub fn root() -> Self {
        Self(vec![ROOT_STATE.to_string()])
    }

    /// Name of the active state
    pub fn current(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or(ROOT_STATE)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.len() <= 1
    }

    fn push(&mut self, state: &str) {
        self.0.push(state.to_string());
    }

    /// Popping the root state is a no-op
    fn pop(&mut self) {
        if self.0.len() > 1 {
            self.0.pop();
        }
    }
}

impl Default for StateStack {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for StateStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Tokens of one line plus the state the next line starts in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineTokens {
    pub tokens: Vec<Token>,
    pub end_state: StateStack,
}

/// Line tokenizer for a single language definition
#[derive(Debug, Clone)]
pub struct Tokenizer {
    definition: LanguageDefinition,
}

impl Tokenizer {
    pub fn new(definition: LanguageDefinition) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &LanguageDefinition {
        &self.definition
    }

    /// Tokenize a single line starting from the root state
    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        self.tokenize_line(line, &StateStack::root()).tokens
    }

    /// Tokenize a single line starting from `state`
    ///
    /// The returned tokens cover `line` completely, in order, without gaps or
    /// overlaps. Adjacent tokens of the same kind are merged.
    pub fn tokenize_line(&self, line: &str, state: &StateStack) -> LineTokens {
        let mut stack = state.clone();
        let mut tokens: Vec<Token> = Vec::new();
        let mut pos = 0;

        while pos < line.len() {
            let rest = &line[pos..];
            let (kind, len) = match self.match_at(rest, &mut stack) {
                Some(hit) => hit,
                None => {
                    let len = rest.chars().next().map(char::len_utf8).unwrap_or(1);
                    (TokenKind::Invalid, len)
                }
            };

            let end = pos + len;
            match tokens.last_mut() {
                Some(last) if last.kind == kind => last.span.end = end,
                _ => tokens.push(Token::new(kind, pos..end)),
            }
            pos = end;
        }

        trace!(
            language = self.definition.id(),
            tokens = tokens.len(),
            state = %stack,
            "tokenized line"
        );

        LineTokens {
            tokens,
            end_state: stack,
        }
    }

    /// Tokenize a multi-line document, carrying state from line to line
    pub fn tokenize_document(&self, text: &str) -> Vec<LineTokens> {
        let mut state = StateStack::root();
        let mut lines = Vec::new();
        for line in text.lines() {
            let result = self.tokenize_line(line, &state);
            state = result.end_state.clone();
            lines.push(result);
        }
        lines
    }

    /// Try the active state's rules at the start of `rest`
    fn match_at(&self, rest: &str, stack: &mut StateStack) -> Option<(TokenKind, usize)> {
        let state = self.definition.state(stack.current())?;

        for rule in &state.rules {
            let Some(len) = rule.match_len(rest) else {
                continue;
            };
            let kind = self.definition.classify(rule.action, &rest[..len]);
            match &rule.transition {
                Transition::None => {}
                Transition::Push(next) => stack.push(next),
                Transition::Pop => stack.pop(),
            }
            return Some((kind, len));
        }

        None
    }
}
