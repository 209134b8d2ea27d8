//! One-shot registration guards
//!
//! Each dialect is registered with a host at most once per
//! [`RegistrationState`]. The guards are independent, so dialects can be set
//! up lazily and in any order.

use std::sync::Once;
use std::time::Duration;

use tracing::debug;

use super::host::{EditorHost, LanguageConfiguration, LanguageRegistration};
use crate::completion::{CompletionProvider, DEFAULT_LOADER_TIMEOUT};
use crate::error::Result;
use crate::lexer::Dialect;

/// Per-dialect `unregistered -> registered` guards
#[derive(Debug)]
pub struct RegistrationState {
    guards: [Once; 3],
    loader_timeout: Duration,
}

impl RegistrationState {
    pub fn new() -> Self {
        Self {
            guards: [Once::new(), Once::new(), Once::new()],
            loader_timeout: DEFAULT_LOADER_TIMEOUT,
        }
    }

    /// Timeout given to the completion providers this state installs
    pub fn with_loader_timeout(mut self, timeout: Duration) -> Self {
        self.loader_timeout = timeout;
        self
    }

    pub fn is_registered(&self, dialect: Dialect) -> bool {
        self.guards[dialect.index()].is_completed()
    }

    /// Register `dialect` with `host` unless that already happened
    ///
    /// Returns `Ok(true)` when this call performed the registration. A
    /// definition that fails to build, or a host callback that panics, leaves
    /// the dialect unregistered so a later call can try again.
    pub fn ensure_registered(&self, dialect: Dialect, host: &mut dyn EditorHost) -> Result<bool> {
        let guard = &self.guards[dialect.index()];
        if guard.is_completed() {
            return Ok(false);
        }

        let definition = dialect.definition()?;
        let configuration = LanguageConfiguration::from_definition(&definition);
        let registration = LanguageRegistration::for_dialect(dialect);
        let provider = CompletionProvider::new(dialect).with_timeout(self.loader_timeout);

        // A guard poisoned by a panicking host is retried, not propagated
        let mut registered = false;
        guard.call_once_force(|_| {
            let id = dialect.id();
            host.register_language(&registration);
            host.set_tokenizer(id, &definition);
            host.set_language_configuration(id, &configuration);
            host.register_completion_provider(id, provider, dialect.trigger_characters());
            registered = true;
        });

        if registered {
            debug!(dialect = %dialect, "registered language with editor host");
        }
        Ok(registered)
    }
}

impl Default for RegistrationState {
    fn default() -> Self {
        Self::new()
    }
}
