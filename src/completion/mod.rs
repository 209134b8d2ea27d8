//! Completion suggestions for the query editors
//!
//! # Architecture
//!
//! - **Catalog**: static operators and keywords per dialect, in a fixed order
//! - **Loader**: optional async source of field names (klogs only)
//! - **Provider**: concatenates both, survives loader failures and drops stale answers
//!
//! # Examples
//!
//! ```no_run
//! use kobs_querylang::completion::{CompletionProvider, StaticFieldLoader};
//! use kobs_querylang::lexer::Dialect;
//!
//! # async fn demo() {
//! let provider = CompletionProvider::new(Dialect::Klogs);
//! let loader = StaticFieldLoader::new(vec!["namespace".into(), "app".into()]);
//! let items = provider.suggestions(Some(&loader)).await;
//! assert_eq!(items.last().unwrap().label, "app");
//! # }
//! ```

mod catalog;
mod item;
mod loader;
mod provider;

pub use catalog::catalog;
pub use item::{CompletionItem, CompletionKind};
pub use loader::{FieldLoader, FileFieldLoader, FnFieldLoader, StaticFieldLoader};
pub use provider::{CompletionProvider, CompletionRequest, DEFAULT_LOADER_TIMEOUT};
