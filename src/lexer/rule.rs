//! Tokenizer rules
//!
//! A rule is declared as a [`RuleSpec`] and compiled into a [`Rule`] when the
//! owning [`LanguageDefinition`](super::LanguageDefinition) is built. Rules of a
//! state are tried in declaration order and the first one that matches at the
//! current position wins.

use regex::Regex;

use super::token::TokenKind;

/// What a matching rule emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit a fixed kind
    Emit(TokenKind),
    /// Emit `hit` when the matched text is a declared keyword, `miss` otherwise
    Keywords { hit: TokenKind, miss: TokenKind },
    /// Emit `hit` when the matched text is a declared operator, `miss` otherwise
    Operators { hit: TokenKind, miss: TokenKind },
}

/// State change performed after a rule matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    None,
    /// Enter the named state
    Push(String),
    /// Return to the parent state
    Pop,
}

/// Declaration form of a rule
#[derive(Debug, Clone)]
pub enum RuleSpec {
    /// Match a pattern at the current position
    Match {
        pattern: String,
        action: Action,
        transition: Transition,
    },
    /// Splice the rules of another state in at this position
    Include(String),
}

impl RuleSpec {
    /// Rule emitting a fixed kind
    pub fn emit(pattern: &str, kind: TokenKind) -> Self {
        RuleSpec::Match {
            pattern: pattern.to_string(),
            action: Action::Emit(kind),
            transition: Transition::None,
        }
    }

    /// Identifier-shaped rule reclassified by keyword membership
    pub fn keywords(pattern: &str, hit: TokenKind, miss: TokenKind) -> Self {
        RuleSpec::Match {
            pattern: pattern.to_string(),
            action: Action::Keywords { hit, miss },
            transition: Transition::None,
        }
    }

    /// Symbol-run rule reclassified by operator membership
    pub fn operators(pattern: &str, hit: TokenKind, miss: TokenKind) -> Self {
        RuleSpec::Match {
            pattern: pattern.to_string(),
            action: Action::Operators { hit, miss },
            transition: Transition::None,
        }
    }

    /// Rule that enters `state` after emitting `kind`
    pub fn push(pattern: &str, kind: TokenKind, state: &str) -> Self {
        RuleSpec::Match {
            pattern: pattern.to_string(),
            action: Action::Emit(kind),
            transition: Transition::Push(state.to_string()),
        }
    }

    /// Rule that leaves the current state after emitting `kind`
    pub fn pop(pattern: &str, kind: TokenKind) -> Self {
        RuleSpec::Match {
            pattern: pattern.to_string(),
            action: Action::Emit(kind),
            transition: Transition::Pop,
        }
    }

    /// Reference to a named sub-state
    pub fn include(state: &str) -> Self {
        RuleSpec::Include(state.to_string())
    }
}

/// Compiled rule
#[derive(Debug, Clone)]
pub struct Rule {
    /// Pattern as declared, after `@symbols` expansion
    pub(crate) source: String,
    /// Anchored pattern
    pub(crate) regex: Regex,
    pub(crate) action: Action,
    pub(crate) transition: Transition,
}

impl Rule {
    /// Length in bytes of the non-empty match at the start of `rest`
    pub(crate) fn match_len(&self, rest: &str) -> Option<usize> {
        self.regex
            .find(rest)
            .map(|m| m.end())
            .filter(|len| *len > 0)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }
}
