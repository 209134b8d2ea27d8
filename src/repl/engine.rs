use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::debug;

use crate::completion::FieldLoader;
use crate::config::Config;
use crate::error::{QueryLangError, Result};
use crate::lexer::Dialect;
use crate::registry::RegistrationState;

use super::completer::QueryCompleter;
use super::highlighter::QueryHighlighter;
use super::prompt::QueryPrompt;
use super::session::{HELP_TEXT, ReplCommand, ReplSession};

const COMPLETION_MENU: &str = "completion_menu";

/// REPL engine: line editor on top of a [`ReplSession`]
pub struct ReplEngine {
    /// Line editor for query input
    editor: Reedline,

    prompt: QueryPrompt,

    session: ReplSession,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `config` - Effective configuration
    /// * `dialect` - Initially active dialect
    /// * `loader` - Optional source of dynamic klogs fields
    pub async fn new(
        config: &Config,
        dialect: Dialect,
        loader: Option<Arc<dyn FieldLoader>>,
    ) -> Result<Self> {
        let registration = RegistrationState::new().with_loader_timeout(config.loader_timeout());
        let mut session = ReplSession::new(dialect, registration, loader, &config.display)?;
        session.activate(dialect).await?;

        let shared_state = session.shared_state().clone();
        let history = Self::create_history(config)?;

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );
        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);

        let editor = Reedline::create()
            .with_history(history)
            .with_highlighter(Box::new(QueryHighlighter::new(
                shared_state.clone(),
                config.display.syntax_highlighting && config.display.color_output,
            )))
            .with_completer(Box::new(QueryCompleter::new(shared_state.clone())))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        Ok(Self {
            editor,
            prompt: QueryPrompt::new(shared_state),
            session,
            running: true,
        })
    }

    fn create_history(config: &Config) -> Result<Box<FileBackedHistory>> {
        let history = if config.history.persist {
            FileBackedHistory::with_file(config.history.max_size, config.history.file_path.clone())
        } else {
            FileBackedHistory::new(config.history.max_size)
        };
        history
            .map(Box::new)
            .map_err(|e| QueryLangError::Generic(format!("History error: {e}")))
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, empty on Ctrl-C, None on Ctrl-D
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlC => Ok(Some(String::new())),
            Signal::CtrlD => Ok(None),
            #[allow(unreachable_patterns)]
            _ => Ok(Some(String::new())),
        }
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run until `:quit`, `:exit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        while self.is_running() {
            let Some(input) = self.read_line()? else {
                break;
            };

            let command = match ReplCommand::parse(&input) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    eprintln!("{}", e);
                    continue;
                }
            };

            if let Err(e) = self.execute(command).await {
                eprintln!("{}", e);
            }
        }
        Ok(())
    }

    async fn execute(&mut self, command: ReplCommand) -> Result<()> {
        match command {
            ReplCommand::Query(line) => println!("{}", self.session.render(&line)?),
            ReplCommand::SwitchDialect(dialect) => {
                self.session.activate(dialect).await?;
                debug!(dialect = %dialect, "dialect active");
            }
            ReplCommand::Help => println!("{}", HELP_TEXT),
            ReplCommand::Exit => self.running = false,
        }
        Ok(())
    }
}
