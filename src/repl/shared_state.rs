use std::sync::{Arc, PoisonError, RwLock};

use crate::completion::CompletionItem;
use crate::config::{DisplayConfig, OutputFormat};
use crate::lexer::{Dialect, Tokenizer};

/// State shared between the engine and the reedline components it installs.
///
/// The highlighter and completer live inside the line editor, so switching
/// dialects has to go through here rather than through the editor.
#[derive(Debug, Clone)]
pub struct SharedState {
    /// Active dialect
    dialect: Arc<RwLock<Dialect>>,

    /// Tokenizer for the active dialect
    tokenizer: Arc<RwLock<Arc<Tokenizer>>>,

    /// Candidates the completer filters, static catalog first
    suggestions: Arc<RwLock<Vec<CompletionItem>>>,

    /// Output format setting
    output_format: Arc<RwLock<OutputFormat>>,

    /// Color output setting
    color_enabled: Arc<RwLock<bool>>,
}

impl SharedState {
    /// Create a new shared state with display configuration.
    ///
    /// * `dialect` - Initially active dialect
    /// * `tokenizer` - Tokenizer of that dialect
    /// * `display_config` - Display configuration settings
    pub fn with_config(
        dialect: Dialect,
        tokenizer: Arc<Tokenizer>,
        display_config: &DisplayConfig,
    ) -> Self {
        Self {
            dialect: Arc::new(RwLock::new(dialect)),
            tokenizer: Arc::new(RwLock::new(tokenizer)),
            suggestions: Arc::new(RwLock::new(Vec::new())),
            output_format: Arc::new(RwLock::new(display_config.format)),
            color_enabled: Arc::new(RwLock::new(display_config.color_output)),
        }
    }

    pub fn dialect(&self) -> Dialect {
        *self.dialect.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn tokenizer(&self) -> Arc<Tokenizer> {
        self.tokenizer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make `dialect` active; suggestions are cleared until the next refresh
    pub fn switch_dialect(&self, dialect: Dialect, tokenizer: Arc<Tokenizer>) {
        *self.dialect.write().unwrap_or_else(PoisonError::into_inner) = dialect;
        *self.tokenizer.write().unwrap_or_else(PoisonError::into_inner) = tokenizer;
        self.suggestions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn suggestions(&self) -> Vec<CompletionItem> {
        self.suggestions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_suggestions(&self, items: Vec<CompletionItem>) {
        *self.suggestions.write().unwrap_or_else(PoisonError::into_inner) = items;
    }

    pub fn get_format(&self) -> OutputFormat {
        *self.output_format.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_format(&self, format: OutputFormat) {
        *self.output_format.write().unwrap_or_else(PoisonError::into_inner) = format;
    }

    pub fn get_color_enabled(&self) -> bool {
        *self.color_enabled.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_color_enabled(&self, enabled: bool) {
        *self.color_enabled.write().unwrap_or_else(PoisonError::into_inner) = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::catalog;

    fn klogs_state() -> SharedState {
        let tokenizer = Arc::new(Dialect::Klogs.tokenizer().unwrap());
        SharedState::with_config(Dialect::Klogs, tokenizer, &DisplayConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let state = klogs_state();
        assert_eq!(state.dialect(), Dialect::Klogs);
        assert_eq!(state.get_format(), OutputFormat::Table);
    }

    #[test]
    fn test_switch_clears_suggestions() {
        let state = klogs_state();
        state.set_suggestions(catalog(Dialect::Klogs));
        assert!(!state.suggestions().is_empty());

        let tokenizer = Arc::new(Dialect::MongoDb.tokenizer().unwrap());
        state.switch_dialect(Dialect::MongoDb, tokenizer);
        assert_eq!(state.dialect(), Dialect::MongoDb);
        assert_eq!(state.tokenizer().definition().id(), "mongodb");
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn test_clones_share_settings() {
        let state = klogs_state();
        let clone = state.clone();
        clone.set_color_enabled(false);
        clone.set_format(OutputFormat::Json);
        assert!(!state.get_color_enabled());
        assert_eq!(state.get_format(), OutputFormat::Json);
    }
}
