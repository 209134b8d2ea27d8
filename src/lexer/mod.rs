//! Query language lexers
//!
//! This module provides rule-table lexers for the kobs query editors:
//!
//! - **Rules** ([`RuleSpec`], [`Rule`]): ordered pattern/classification pairs
//! - **Definitions** ([`LanguageDefinition`]): named states, keyword and operator sets
//! - **Driver** ([`Tokenizer`]): line-by-line scanning with a state stack
//! - **Dialects** ([`Dialect`]): klogs, MongoDB and Signal Sciences tables
//!
//! # Examples
//!
//! ```
//! use kobs_querylang::lexer::{Dialect, TokenKind};
//!
//! let tokenizer = Dialect::Klogs.tokenizer().unwrap();
//! let tokens = tokenizer.tokenize("app='web' _and_ level=~'err%'");
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! assert_eq!(tokens[1].kind, TokenKind::Operator);
//! assert_eq!(tokens[2].kind, TokenKind::String);
//! ```

pub mod definition;
pub mod dialect;
pub mod rule;
pub mod token;
pub mod tokenizer;

pub use definition::{BracketPair, LanguageBuilder, LanguageDefinition, LexerState, ROOT_STATE};
pub use dialect::Dialect;
pub use rule::{Action, Rule, RuleSpec, Transition};
pub use token::{Token, TokenKind};
pub use tokenizer::{LineTokens, StateStack, Tokenizer};
