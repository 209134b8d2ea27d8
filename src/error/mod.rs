//! Error handling for the query language lexers.
//!
//! Tokenization itself never fails: unmatched input is consumed as `Invalid`.
//! Errors only arise while *building* a language definition (bad patterns,
//! dangling state references), while loading dynamic completion fields, and
//! in the ambient layers (configuration, I/O, the terminal host).
//!
//! # Example
//!
//! ```rust
//! use kobs_querylang::error::{LexerError, QueryLangError, Result};
//!
//! fn build() -> Result<()> {
//!     Err(LexerError::MissingRootState { language: "demo".into() }.into())
//! }
//!
//! assert!(matches!(build(), Err(QueryLangError::Lexer(_))));
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{CompletionError, ConfigError, LexerError, QueryLangError, Result};
