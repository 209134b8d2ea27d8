//! Editor host backing the REPL
//!
//! Keeps whatever the registration calls install, keyed by language id, so
//! the engine can look it up again when a dialect becomes active.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::completion::CompletionProvider;
use crate::lexer::{LanguageDefinition, Tokenizer};
use crate::registry::{EditorHost, LanguageConfiguration, LanguageRegistration};

/// Per-language installations received from [`crate::registry::RegistrationState`]
#[derive(Debug, Default)]
pub struct ReplHost {
    languages: Vec<LanguageRegistration>,
    tokenizers: HashMap<String, Arc<Tokenizer>>,
    configurations: HashMap<String, LanguageConfiguration>,
    providers: HashMap<String, (CompletionProvider, Vec<char>)>,
}

impl ReplHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn languages(&self) -> &[LanguageRegistration] {
        &self.languages
    }

    pub fn tokenizer(&self, id: &str) -> Option<Arc<Tokenizer>> {
        self.tokenizers.get(id).cloned()
    }

    pub fn configuration(&self, id: &str) -> Option<&LanguageConfiguration> {
        self.configurations.get(id)
    }

    pub fn provider(&self, id: &str) -> Option<&CompletionProvider> {
        self.providers.get(id).map(|(provider, _)| provider)
    }

    pub fn trigger_characters(&self, id: &str) -> &[char] {
        self.providers
            .get(id)
            .map_or(&[], |(_, triggers)| triggers.as_slice())
    }
}

impl EditorHost for ReplHost {
    fn register_language(&mut self, registration: &LanguageRegistration) {
        debug!(id = %registration.id, "language declared");
        self.languages.push(registration.clone());
    }

    fn set_tokenizer(&mut self, id: &str, definition: &LanguageDefinition) {
        self.tokenizers
            .insert(id.to_string(), Arc::new(Tokenizer::new(definition.clone())));
    }

    fn set_language_configuration(&mut self, id: &str, configuration: &LanguageConfiguration) {
        self.configurations
            .insert(id.to_string(), configuration.clone());
    }

    fn register_completion_provider(
        &mut self,
        id: &str,
        provider: CompletionProvider,
        trigger_characters: &[char],
    ) {
        self.providers
            .insert(id.to_string(), (provider, trigger_characters.to_vec()));
    }
}
