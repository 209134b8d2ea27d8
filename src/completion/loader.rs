//! Dynamic field loaders
//!
//! A loader supplies identifiers that are only known at query time, such as
//! the columns of the current klogs table. Transport is up to the
//! implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::{CompletionError, Result};

/// Source of dynamic completion identifiers
#[async_trait]
pub trait FieldLoader: Send + Sync {
    /// Fetch the current list of field names
    async fn load_fields(&self) -> Result<Vec<String>>;
}

/// Loader returning a fixed list
#[derive(Debug, Clone, Default)]
pub struct StaticFieldLoader {
    fields: Vec<String>,
}

impl StaticFieldLoader {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }
}

#[async_trait]
impl FieldLoader for StaticFieldLoader {
    async fn load_fields(&self) -> Result<Vec<String>> {
        Ok(self.fields.clone())
    }
}

/// Loader reading one field name per line from a file
///
/// Blank lines and lines starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct FileFieldLoader {
    path: PathBuf,
}

impl FileFieldLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FieldLoader for FileFieldLoader {
    async fn load_fields(&self) -> Result<Vec<String>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CompletionError::LoaderFailed(format!("{}: {e}", self.path.display()))
        })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }
}

/// Loader backed by a closure that returns a future
pub struct FnFieldLoader<F>
where
    F: Fn() -> BoxFuture<'static, Result<Vec<String>>> + Send + Sync,
{
    load: F,
}

impl<F> FnFieldLoader<F>
where
    F: Fn() -> BoxFuture<'static, Result<Vec<String>>> + Send + Sync,
{
    pub fn new(load: F) -> Self {
        Self { load }
    }
}

#[async_trait]
impl<F> FieldLoader for FnFieldLoader<F>
where
    F: Fn() -> BoxFuture<'static, Result<Vec<String>>> + Send + Sync,
{
    async fn load_fields(&self) -> Result<Vec<String>> {
        (self.load)().await
    }
}
