//! MongoDB filter documents
//!
//! Filters are shell-style documents such as `{"status": {"$in": ["A", "D"]}}`.
//! `$`-operators are symbol runs that only light up when they are declared.

use crate::error::Result;
use crate::lexer::{LanguageDefinition, RuleSpec, TokenKind};

pub const ID: &str = "mongodb";

/// Query, projection and update operators
pub const OPERATORS: &[&str] = &[
    "$eq",
    "$gt",
    "$gte",
    "$in",
    "$lt",
    "$lte",
    "$ne",
    "$nin",
    "$and",
    "$not",
    "$nor",
    "$or",
    "$exists",
    "$type",
    "$expr",
    "$jsonSchema",
    "$mod",
    "$regex",
    "$options",
    "$text",
    "$search",
    "$where",
    "$all",
    "$elemMatch",
    "$size",
    "$bitsAllClear",
    "$bitsAllSet",
    "$bitsAnyClear",
    "$bitsAnySet",
    "$slice",
    "$currentDate",
    "$inc",
    "$min",
    "$max",
    "$mul",
    "$rename",
    "$set",
    "$setOnInsert",
    "$unset",
    "$addToSet",
    "$pop",
    "$pull",
    "$push",
    "$pullAll",
];

pub const KEYWORDS: &[&str] = &["true", "false", "null"];

pub(super) const SYMBOLS: &str = r"\$[a-zA-Z]+|[$=><!~?&|+\-*/^%]+";

/// Build the MongoDB definition
pub fn definition() -> Result<LanguageDefinition> {
    LanguageDefinition::builder(ID)
        .keywords(KEYWORDS)
        .operators(OPERATORS)
        .symbols(SYMBOLS)
        .bracket("{", "}", "delimiter.curly")
        .bracket("[", "]", "delimiter.square")
        .bracket("(", ")", "delimiter.parenthesis")
        .quote("'")
        .quote("\"")
        .state(
            "root",
            vec![
                RuleSpec::include("whitespace"),
                RuleSpec::emit(super::NUMBER, TokenKind::Number),
                RuleSpec::keywords(r"[a-zA-Z_]\w*", TokenKind::Keyword, TokenKind::Identifier),
                RuleSpec::emit(r"[{}()\[\]]", TokenKind::Bracket),
                RuleSpec::emit(r"[;,.:]", TokenKind::Delimiter),
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
