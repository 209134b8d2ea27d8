//! Signal Sciences request search
//!
//! Searches are space separated `field:value` terms, e.g.
//! `from:-1h status:>=400 tag:SQLI -ip:10.0.0.1`. Identifiers may start with a
//! colon so that the value half of a term (`:SQLI`) is scanned as one token.

use crate::error::Result;
use crate::lexer::{LanguageDefinition, RuleSpec, TokenKind};

pub const ID: &str = "signalsciences";

pub const OPERATORS: &[&str] = &["=", "!=", ">", ">=", "<", "<=", "~", "-"];

/// Searchable request fields
pub const KEYWORDS: &[&str] = &[
    "from",
    "until",
    "sort",
    "limit",
    "agentcode",
    "bytesout",
    "country",
    "httpcode",
    "ip",
    "method",
    "path",
    "payload",
    "protocol",
    "ratelimited",
    "remotehost",
    "responsemillis",
    "server",
    "signal",
    "status",
    "tag",
    "tlscipher",
    "tlsprotocol",
    "useragent",
];

pub(super) const SYMBOLS: &str = r"[=><!~?&|+\-*/^%]+";

/// Build the Signal Sciences definition
pub fn definition() -> Result<LanguageDefinition> {
    LanguageDefinition::builder(ID)
        .ignore_case(true)
        .keywords(KEYWORDS)
        .operators(OPERATORS)
        .symbols(SYMBOLS)
        .bracket("(", ")", "delimiter.parenthesis")
        .quote("'")
        .quote("\"")
        .state(
            "root",
            vec![
                RuleSpec::include("whitespace"),
                RuleSpec::emit(super::NUMBER, TokenKind::Number),
                RuleSpec::keywords(r"[a-zA-Z:]\w*", TokenKind::Keyword, TokenKind::Identifier),
                RuleSpec::emit(r"[()]", TokenKind::Bracket),
                RuleSpec::operators("@symbols", TokenKind::Operator, TokenKind::Unstyled),
                RuleSpec::push("'", TokenKind::String, "string"),
                RuleSpec::push("\"", TokenKind::String, "dstring"),
            ],
        )
        .state("whitespace", super::whitespace_rules())
        .state("string", super::single_quoted_rules())
        .state("dstring", super::double_quoted_rules())
        .build()
}
