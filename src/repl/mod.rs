//! Interactive query editor
//!
//! A terminal host for the query dialects, built on reedline:
//! - Syntax highlighting with the dialect tokenizer
//! - Completion from the dialect catalog and loaded fields
//! - Dialect switching with `:dialect <name>`
//! - Persistent command history

mod completer;
mod engine;
mod highlighter;
mod host;
mod prompt;
mod session;
mod shared_state;

pub use completer::QueryCompleter;
pub use engine::ReplEngine;
pub use highlighter::QueryHighlighter;
pub use host::ReplHost;
pub use prompt::QueryPrompt;
pub use session::{ReplCommand, ReplSession};
pub use shared_state::SharedState;
