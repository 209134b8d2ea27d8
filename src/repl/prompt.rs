//! Prompt showing the active dialect

use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

use super::shared_state::SharedState;

/// Prompt for the query REPL, e.g. `klogs> `
pub struct QueryPrompt {
    shared_state: SharedState,
}

impl QueryPrompt {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl Prompt for QueryPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        format!("{}> ", self.shared_state.dialect()).into()
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    /// The indicator is part of the left prompt
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::lexer::Dialect;
    use std::sync::Arc;

    fn create_test_prompt() -> QueryPrompt {
        let tokenizer = Arc::new(Dialect::Klogs.tokenizer().unwrap());
        QueryPrompt::new(SharedState::with_config(
            Dialect::Klogs,
            tokenizer,
            &DisplayConfig::default(),
        ))
    }

    #[test]
    fn test_prompt_follows_dialect() {
        let prompt = create_test_prompt();
        assert_eq!(prompt.render_prompt_left(), "klogs> ");

        let tokenizer = Arc::new(Dialect::SignalSciences.tokenizer().unwrap());
        prompt
            .shared_state
            .switch_dialect(Dialect::SignalSciences, tokenizer);
        assert_eq!(prompt.render_prompt_left(), "signalsciences> ");
    }

    #[test]
    fn test_right_prompt_and_indicator_empty() {
        let prompt = create_test_prompt();
        assert_eq!(prompt.render_prompt_right(), "");
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Default), "");
    }

    #[test]
    fn test_multiline_indicator() {
        let prompt = create_test_prompt();
        assert_eq!(prompt.render_prompt_multiline_indicator(), "... ");
    }
}
