//! klogs query language
//!
//! klogs queries filter log lines stored in ClickHouse, e.g.
//! `namespace='kube-system' _and_ content_level=~'err%'`. The downstream query
//! parser does not understand `[ ] + - , ;` or double-quoted literals, so both
//! are flagged as invalid before any other rule can claim them.

use crate::error::Result;
use crate::lexer::{LanguageDefinition, RuleSpec, TokenKind};

pub const ID: &str = "klogs";

/// Comparison operators understood by the klogs parser
pub const OPERATORS: &[&str] = &["=", "!=", ">", ">=", "<", "<=", "=~", "!~", "~"];

/// Logical operators, lower-case spelling
pub const LOGICAL_OPERATORS: &[&str] = &["_and_", "_or_", "_not_", "_exists_"];

/// Logical operators, upper-case spelling
pub const LOGICAL_OPERATORS_UPPER: &[&str] = &["_AND_", "_OR_", "_NOT_", "_EXISTS_"];

pub(super) const SYMBOLS: &str = r"[=><!~?:&|*/^%#]+";

/// Build the klogs definition
pub fn definition() -> Result<LanguageDefinition> {
    LanguageDefinition::builder(ID)
        .ignore_case(true)
        .keywords(LOGICAL_OPERATORS)
        .keywords(LOGICAL_OPERATORS_UPPER)
        .operators(OPERATORS)
        .symbols(SYMBOLS)
        .bracket("(", ")", "delimiter.parenthesis")
        .quote("'")
        .state(
            "root",
            vec![
                RuleSpec::include("whitespace"),
                RuleSpec::emit(r"[\[\]+\-,;]", TokenKind::Invalid),
                RuleSpec::emit(super::NUMBER, TokenKind::Number),
                RuleSpec::keywords(r"[a-zA-Z_]\w*", TokenKind::Keyword, TokenKind::Identifier),
                RuleSpec::emit(r"[()]", TokenKind::Bracket),
                RuleSpec::operators("@symbols", TokenKind::Operator, TokenKind::Unstyled),
                RuleSpec::push("'", TokenKind::String, "string"),
                RuleSpec::emit(r#""[^"]*"?"#, TokenKind::Invalid),
            ],
        )
        .state("whitespace", super::whitespace_rules())
        .state("string", super::single_quoted_rules())
        .build()
}
