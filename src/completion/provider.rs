//! Completion provider
//!
//! Combines a dialect's static catalog with identifiers from an optional
//! [`FieldLoader`]. Loader failures never reach the suggestion list: they are
//! logged and the static part is returned on its own.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::catalog::catalog;
use super::item::{CompletionItem, CompletionKind};
use super::loader::FieldLoader;
use crate::error::{CompletionError, Result};
use crate::lexer::Dialect;

/// Default time a field loader may take before it is abandoned
pub const DEFAULT_LOADER_TIMEOUT: Duration = Duration::from_millis(2000);

/// Ticket identifying one completion request
///
/// Only the most recently issued ticket of a provider is current; answers
/// for older tickets are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionRequest {
    generation: u64,
}

/// Suggestion source for one dialect
///
/// Clones share the request counter, so a host can hand clones to several
/// callers and still have later requests supersede earlier ones.
#[derive(Debug, Clone)]
pub struct CompletionProvider {
    dialect: Dialect,
    catalog: Vec<CompletionItem>,
    loader_timeout: Duration,
    generation: Arc<AtomicU64>,
}

impl CompletionProvider {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            catalog: catalog(dialect),
            loader_timeout: DEFAULT_LOADER_TIMEOUT,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.loader_timeout = timeout;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Whether this dialect consults a field loader at all
    pub fn accepts_fields(&self) -> bool {
        self.dialect == Dialect::Klogs
    }

    /// Operators and keywords, without dynamic entries
    pub fn static_suggestions(&self) -> Vec<CompletionItem> {
        self.catalog.clone()
    }

    /// Full suggestion list: static catalog followed by loaded fields
    pub async fn suggestions(&self, loader: Option<&dyn FieldLoader>) -> Vec<CompletionItem> {
        let mut items = self.static_suggestions();
        match self.dynamic_suggestions(loader).await {
            Ok(fields) => items.extend(fields),
            Err(e) => warn!(dialect = %self.dialect, "{e}; using static suggestions only"),
        }
        items
    }

    /// Issue a new request ticket, superseding all earlier ones
    pub fn begin(&self) -> CompletionRequest {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        CompletionRequest { generation }
    }

    pub fn is_current(&self, request: CompletionRequest) -> bool {
        self.generation.load(Ordering::SeqCst) == request.generation
    }

    /// Suggestions for `request`, or `None` if it was cancelled or superseded
    /// before the loader answered
    pub async fn suggestions_for(
        &self,
        request: CompletionRequest,
        loader: Option<&dyn FieldLoader>,
        cancel: &CancellationToken,
    ) -> Option<Vec<CompletionItem>> {
        let items = tokio::select! {
            _ = cancel.cancelled() => {
                debug!(dialect = %self.dialect, "{}", CompletionError::Cancelled);
                return None;
            }
            items = self.suggestions(loader) => items,
        };

        if !self.is_current(request) {
            debug!(dialect = %self.dialect, "discarding stale completion response");
            return None;
        }
        Some(items)
    }

    async fn dynamic_suggestions(
        &self,
        loader: Option<&dyn FieldLoader>,
    ) -> Result<Vec<CompletionItem>> {
        let Some(loader) = loader else {
            return Ok(Vec::new());
        };
        if !self.accepts_fields() {
            debug!(dialect = %self.dialect, "dialect takes no dynamic fields, loader ignored");
            return Ok(Vec::new());
        }

        let fields = tokio::time::timeout(self.loader_timeout, loader.load_fields())
            .await
            .map_err(|_| CompletionError::Timeout(self.loader_timeout.as_millis() as u64))??;
        debug!(dialect = %self.dialect, count = fields.len(), "loaded completion fields");

        Ok(fields
            .into_iter()
            .map(|field| CompletionItem::plain(field, CompletionKind::Value))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{FnFieldLoader, StaticFieldLoader};
    use crate::error::QueryLangError;
    use crate::lexer::dialect::klogs;
    use futures::FutureExt;

    fn static_len() -> usize {
        klogs::OPERATORS.len() + klogs::LOGICAL_OPERATORS.len() * 2
    }

    #[tokio::test]
    async fn test_klogs_without_loader() {
        let provider = CompletionProvider::new(Dialect::Klogs);
        let items = provider.suggestions(None).await;
        assert_eq!(items.len(), static_len());
        assert_eq!(items, provider.static_suggestions());
    }

    #[tokio::test]
    async fn test_klogs_with_loader_appends_values() {
        let provider = CompletionProvider::new(Dialect::Klogs);
        let loader = StaticFieldLoader::new(vec!["service".into(), "level".into()]);
        let items = provider.suggestions(Some(&loader)).await;

        assert_eq!(items.len(), static_len() + 2);
        let tail = &items[static_len()..];
        assert_eq!(tail[0], CompletionItem::plain("service", CompletionKind::Value));
        assert_eq!(tail[1].insert_text, "level");
        assert_eq!(tail[1].kind, CompletionKind::Value);
    }

    #[tokio::test]
    async fn test_loader_failure_falls_back_to_static() {
        let provider = CompletionProvider::new(Dialect::Klogs);
        let loader = FnFieldLoader::new(|| {
            async { Err(QueryLangError::from(CompletionError::LoaderFailed("503".into()))) }
                .boxed()
        });
        let items = provider.suggestions(Some(&loader)).await;
        assert_eq!(items.len(), static_len());
        assert!(items.iter().all(|i| i.kind != CompletionKind::Value));
    }

    #[tokio::test]
    async fn test_loader_timeout_falls_back_to_static() {
        let provider =
            CompletionProvider::new(Dialect::Klogs).with_timeout(Duration::from_millis(10));
        let loader = FnFieldLoader::new(|| {
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(vec!["late".to_string()])
            }
            .boxed()
        });
        let items = provider.suggestions(Some(&loader)).await;
        assert_eq!(items.len(), static_len());
    }

    #[tokio::test]
    async fn test_loader_ignored_for_other_dialects() {
        let provider = CompletionProvider::new(Dialect::MongoDb);
        let loader = StaticFieldLoader::new(vec!["field".into()]);
        let items = provider.suggestions(Some(&loader)).await;
        assert_eq!(items, provider.static_suggestions());
    }

    #[tokio::test]
    async fn test_stale_request_is_discarded() {
        let provider = CompletionProvider::new(Dialect::Klogs);
        let cancel = CancellationToken::new();

        let first = provider.begin();
        let second = provider.clone().begin();
        assert!(!provider.is_current(first));

        assert!(provider.suggestions_for(first, None, &cancel).await.is_none());
        let items = provider.suggestions_for(second, None, &cancel).await;
        assert_eq!(items.map(|i| i.len()), Some(static_len()));
    }

    #[tokio::test]
    async fn test_cancelled_request() {
        let provider = CompletionProvider::new(Dialect::Klogs);
        let loader = FnFieldLoader::new(|| {
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(Vec::new())
            }
            .boxed()
        });
        let cancel = CancellationToken::new();
        cancel.cancel();

        let request = provider.begin();
        assert!(
            provider
                .suggestions_for(request, Some(&loader), &cancel)
                .await
                .is_none()
        );
    }
}
