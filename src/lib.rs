//! Query language support for the kobs editors
//!
//! This library provides rule-table lexers and completion catalogs for three
//! query dialects: klogs, MongoDB filter documents and Signal Sciences search.
//! It can be embedded in any text editor through the [`registry::EditorHost`]
//! trait, or used through the bundled terminal editor.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `completion`: Static catalogs, field loaders and the completion provider
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `formatter`: Output formatting for tokens and suggestions
//! - `lexer`: Language definitions, dialects and the tokenizer
//! - `registry`: One-shot registration with an editor host, Monarch export
//! - `repl`: Interactive terminal editor
//!
//! # Example
//!
//! ```
//! use kobs_querylang::lexer::{Dialect, TokenKind};
//!
//! let tokenizer = Dialect::Klogs.tokenizer().unwrap();
//! let tokens = tokenizer.tokenize("level='error' _and_ count>=3");
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod formatter;
pub mod lexer;
pub mod registry;
pub mod repl;

// Re-export commonly used types
pub use completion::{CompletionItem, CompletionKind, CompletionProvider, FieldLoader};
pub use config::Config;
pub use error::{QueryLangError, Result};
pub use formatter::Formatter;
pub use lexer::{Dialect, LanguageDefinition, Token, TokenKind, Tokenizer};
pub use registry::{EditorHost, MonarchGrammar, RegistrationState};
pub use repl::ReplEngine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}
