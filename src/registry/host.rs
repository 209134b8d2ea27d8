//! Editor host contract
//!
//! The host is whatever renders the query box. It learns about a dialect
//! through four calls, made once per dialect by
//! [`RegistrationState`](super::RegistrationState).

use serde::Serialize;

use crate::completion::CompletionProvider;
use crate::lexer::{BracketPair, Dialect, LanguageDefinition};

/// Identity of a language as announced to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageRegistration {
    pub id: String,
    pub aliases: Vec<String>,
    pub extensions: Vec<String>,
    pub mimetypes: Vec<String>,
}

impl LanguageRegistration {
    pub fn for_dialect(dialect: Dialect) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            id: dialect.id().to_string(),
            aliases: owned(dialect.aliases()),
            extensions: owned(dialect.extensions()),
            mimetypes: owned(dialect.mimetypes()),
        }
    }
}

/// Open/close pair for auto-closing and surrounding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterPair {
    pub open: String,
    pub close: String,
}

/// Editing behaviour derived from a definition's brackets and quotes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfiguration {
    pub brackets: Vec<(String, String)>,
    pub auto_closing_pairs: Vec<CharacterPair>,
    pub surrounding_pairs: Vec<CharacterPair>,
}

impl LanguageConfiguration {
    pub fn from_definition(definition: &LanguageDefinition) -> Self {
        let bracket_pairs = definition.brackets().iter().map(|BracketPair { open, close, .. }| {
            CharacterPair {
                open: open.clone(),
                close: close.clone(),
            }
        });
        let quote_pairs = definition.quotes().iter().map(|q| CharacterPair {
            open: q.clone(),
            close: q.clone(),
        });
        let pairs: Vec<CharacterPair> = bracket_pairs.chain(quote_pairs).collect();

        Self {
            brackets: definition
                .brackets()
                .iter()
                .map(|b| (b.open.clone(), b.close.clone()))
                .collect(),
            auto_closing_pairs: pairs.clone(),
            surrounding_pairs: pairs,
        }
    }
}

/// Text editing component a dialect registers itself with
pub trait EditorHost {
    /// Declare a language id to the host
    fn register_language(&mut self, registration: &LanguageRegistration);

    /// Install the tokenizer tables for `id`
    fn set_tokenizer(&mut self, id: &str, definition: &LanguageDefinition);

    /// Install bracket and auto-closing configuration for `id`
    fn set_language_configuration(&mut self, id: &str, configuration: &LanguageConfiguration);

    /// Install the completion callback for `id`
    fn register_completion_provider(
        &mut self,
        id: &str,
        provider: CompletionProvider,
        trigger_characters: &[char],
    );
}
