//! Dialect session behind the line editor
//!
//! Registers dialects on first use, keeps the shared state pointed at the
//! active one and reloads completion candidates after every switch.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::host::ReplHost;
use super::shared_state::SharedState;
use crate::completion::FieldLoader;
use crate::config::DisplayConfig;
use crate::error::{QueryLangError, Result};
use crate::formatter::Formatter;
use crate::lexer::{Dialect, LineTokens};
use crate::registry::RegistrationState;

/// Parsed REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// A query line to tokenize
    Query(String),
    /// `:dialect <name>`
    SwitchDialect(Dialect),
    /// `:help`
    Help,
    /// `:quit` or `:exit`
    Exit,
}

impl ReplCommand {
    /// Parse one line of input; `None` for blank lines
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let Some(command) = trimmed.strip_prefix(':') else {
            return Ok(Some(ReplCommand::Query(input.to_string())));
        };

        let mut parts = command.split_whitespace();
        let cmd = match (parts.next(), parts.next(), parts.next()) {
            (Some("quit" | "exit"), None, _) => ReplCommand::Exit,
            (Some("help"), None, _) => ReplCommand::Help,
            (Some("dialect"), Some(name), None) => ReplCommand::SwitchDialect(name.parse()?),
            (Some("dialect"), _, _) => {
                return Err(QueryLangError::Generic(
                    "usage: :dialect <klogs|mongodb|signalsciences>".to_string(),
                ));
            }
            _ => {
                return Err(QueryLangError::Generic(format!(
                    "unknown command: {trimmed} (try :help)"
                )));
            }
        };
        Ok(Some(cmd))
    }
}

pub const HELP_TEXT: &str = "\
Type a query to see its tokens.

  :dialect <name>   switch to klogs, mongodb or signalsciences
  :help             show this help
  :quit, :exit      leave";

/// Active dialect plus everything registered so far
pub struct ReplSession {
    shared_state: SharedState,
    registration: RegistrationState,
    host: ReplHost,
    loader: Option<Arc<dyn FieldLoader>>,
    pending: CancellationToken,
}

impl ReplSession {
    /// Register `dialect` and make it active
    pub fn new(
        dialect: Dialect,
        registration: RegistrationState,
        loader: Option<Arc<dyn FieldLoader>>,
        display_config: &DisplayConfig,
    ) -> Result<Self> {
        let mut host = ReplHost::new();
        registration.ensure_registered(dialect, &mut host)?;
        let tokenizer = host
            .tokenizer(dialect.id())
            .ok_or_else(|| QueryLangError::Generic(format!("no tokenizer for {dialect}")))?;

        Ok(Self {
            shared_state: SharedState::with_config(dialect, tokenizer, display_config),
            registration,
            host,
            loader,
            pending: CancellationToken::new(),
        })
    }

    pub fn shared_state(&self) -> &SharedState {
        &self.shared_state
    }

    pub fn host(&self) -> &ReplHost {
        &self.host
    }

    /// Switch to `dialect`, registering it on first use, and reload
    /// completion candidates
    pub async fn activate(&mut self, dialect: Dialect) -> Result<()> {
        let id = dialect.id();
        self.registration.ensure_registered(dialect, &mut self.host)?;
        let tokenizer = self
            .host
            .tokenizer(id)
            .ok_or_else(|| QueryLangError::Generic(format!("no tokenizer for {dialect}")))?;

        if self.shared_state.dialect() != dialect {
            debug!(dialect = %dialect, "switching dialect");
        }
        self.shared_state.switch_dialect(dialect, tokenizer);
        self.refresh_suggestions().await;
        Ok(())
    }

    /// Replace the candidate list with a fresh answer from the active
    /// dialect's provider
    ///
    /// A refresh still waiting on its loader is cancelled first.
    pub async fn refresh_suggestions(&mut self) {
        self.pending.cancel();
        self.pending = CancellationToken::new();

        let Some(provider) = self.host.provider(self.shared_state.dialect().id()) else {
            return;
        };
        let request = provider.begin();
        if let Some(items) = provider
            .suggestions_for(request, self.loader.as_deref(), &self.pending)
            .await
        {
            self.shared_state.set_suggestions(items);
        }
    }

    /// Tokenize `line` with the active dialect
    pub fn tokenize(&self, line: &str) -> LineTokens {
        self.shared_state
            .tokenizer()
            .tokenize_line(line, &Default::default())
    }

    /// Tokens of `line` in the current output format
    pub fn render(&self, line: &str) -> Result<String> {
        let formatter = Formatter::new(
            self.shared_state.get_format(),
            self.shared_state.get_color_enabled(),
        );
        formatter.format_tokens(&[(line, self.tokenize(line))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionKind, FnFieldLoader, StaticFieldLoader};
    use crate::config::OutputFormat;
    use crate::error::LexerError;
    use futures::FutureExt;
    use std::time::Duration;

    fn session(dialect: Dialect, loader: Option<Arc<dyn FieldLoader>>) -> ReplSession {
        ReplSession::new(
            dialect,
            RegistrationState::new(),
            loader,
            &DisplayConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("   ").unwrap(), None);
        assert_eq!(ReplCommand::parse(":quit").unwrap(), Some(ReplCommand::Exit));
        assert_eq!(ReplCommand::parse(" :exit ").unwrap(), Some(ReplCommand::Exit));
        assert_eq!(ReplCommand::parse(":help").unwrap(), Some(ReplCommand::Help));
        assert_eq!(
            ReplCommand::parse(":dialect sigsci").unwrap(),
            Some(ReplCommand::SwitchDialect(Dialect::SignalSciences))
        );
        assert_eq!(
            ReplCommand::parse("a='b'").unwrap(),
            Some(ReplCommand::Query("a='b'".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(ReplCommand::parse(":dialect").is_err());
        assert!(ReplCommand::parse(":frobnicate").is_err());
        assert!(matches!(
            ReplCommand::parse(":dialect sql"),
            Err(QueryLangError::Lexer(LexerError::UnknownDialect(_)))
        ));
    }

    #[tokio::test]
    async fn test_activate_loads_fields_for_klogs() {
        let loader: Arc<dyn FieldLoader> =
            Arc::new(StaticFieldLoader::new(vec!["namespace".to_string()]));
        let mut session = session(Dialect::Klogs, Some(loader));
        session.activate(Dialect::Klogs).await.unwrap();

        let items = session.shared_state().suggestions();
        let last = items.last().unwrap();
        assert_eq!(last.label, "namespace");
        assert_eq!(last.kind, CompletionKind::Value);
    }

    #[tokio::test]
    async fn test_switching_is_idempotent() {
        let mut session = session(Dialect::Klogs, None);
        session.activate(Dialect::MongoDb).await.unwrap();
        session.activate(Dialect::Klogs).await.unwrap();
        session.activate(Dialect::MongoDb).await.unwrap();

        assert_eq!(session.host().languages().len(), 2);
        assert_eq!(session.shared_state().dialect(), Dialect::MongoDb);
        assert!(
            session
                .shared_state()
                .suggestions()
                .iter()
                .any(|item| item.label == "$eq")
        );
    }

    #[tokio::test]
    async fn test_failing_loader_keeps_static_suggestions() {
        let loader: Arc<dyn FieldLoader> = Arc::new(FnFieldLoader::new(|| {
            async { Err::<Vec<String>, _>(QueryLangError::Generic("backend down".to_string())) }.boxed()
        }));
        let mut session = session(Dialect::Klogs, Some(loader));
        session.activate(Dialect::Klogs).await.unwrap();

        let items = session.shared_state().suggestions();
        assert_eq!(items, crate::completion::catalog(Dialect::Klogs));
    }

    #[tokio::test]
    async fn test_slow_loader_times_out() {
        let loader: Arc<dyn FieldLoader> = Arc::new(FnFieldLoader::new(|| {
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, QueryLangError>(vec!["late".to_string()])
            }
            .boxed()
        }));
        let registration = RegistrationState::new().with_loader_timeout(Duration::from_millis(20));
        let mut session =
            ReplSession::new(Dialect::Klogs, registration, Some(loader), &DisplayConfig::default())
                .unwrap();
        session.activate(Dialect::Klogs).await.unwrap();

        let items = session.shared_state().suggestions();
        assert!(!items.iter().any(|item| item.label == "late"));
        assert!(!items.is_empty());
    }

    #[test]
    fn test_render_json() {
        let session = session(Dialect::SignalSciences, None);
        session.shared_state().set_format(OutputFormat::Json);
        let output = session.render("from:sqli").unwrap();
        assert!(output.contains("\"endState\":\"root\""));
    }
}
