//! Completer for reedline - filters the dialect's suggestions by the word
//! before the cursor

use reedline::{Completer, Span, Suggestion};

use super::shared_state::SharedState;

/// Query completer for reedline
pub struct QueryCompleter {
    shared_state: SharedState,
}

impl QueryCompleter {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '.')
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_punctuation() && !is_word_char(c) && !"()[]{}'\",;".contains(c)
}

/// Byte offset where the word ending at `pos` starts
///
/// A word is a run of identifier characters or a run of operator symbols,
/// whichever the character left of the cursor belongs to.
fn word_start(line: &str, pos: usize) -> usize {
    let before = &line[..pos];
    let Some(last) = before.chars().next_back() else {
        return pos;
    };
    let class: fn(char) -> bool = if is_word_char(last) {
        is_word_char
    } else if is_symbol_char(last) {
        is_symbol_char
    } else {
        return pos;
    };

    before
        .char_indices()
        .rev()
        .take_while(|(_, c)| class(*c))
        .last()
        .map_or(pos, |(i, _)| i)
}

impl Completer for QueryCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let pos = pos.min(line.len());
        if !line.is_char_boundary(pos) || line.trim_start().starts_with(':') {
            return Vec::new();
        }

        let start = word_start(line, pos);
        let word = &line[start..pos];
        let ignore_case = self.shared_state.tokenizer().definition().ignore_case();

        // Snippet escapes such as `\$` only mean something to snippet-aware
        // editors, so the terminal inserts the label.
        self.shared_state
            .suggestions()
            .into_iter()
            .filter(|item| item.matches_prefix(word, ignore_case))
            .map(|item| Suggestion {
                value: item.label,
                description: Some(item.kind.to_string()),
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}
