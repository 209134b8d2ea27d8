//! Language definitions
//!
//! A [`LanguageDefinition`] is the immutable table a [`Tokenizer`](super::Tokenizer)
//! runs against: named states with ordered rules, plus the keyword and operator
//! sets the reclassifying rules consult. Definitions are assembled with a
//! [`LanguageBuilder`], which validates state references and compiles every
//! pattern up front so that tokenizing can never fail.

use std::collections::{HashMap, HashSet};

use regex::RegexBuilder;
use serde::Serialize;

use super::rule::{Action, Rule, RuleSpec, Transition};
use crate::error::{LexerError, Result};

/// Name of the state every line scan starts in
pub const ROOT_STATE: &str = "root";

/// Bracket pair used for matching and auto-closing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketPair {
    pub open: String,
    pub close: String,
    /// Editor token name, e.g. `delimiter.parenthesis`
    pub token: String,
}

impl BracketPair {
    pub fn new(open: &str, close: &str, token: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            token: token.to_string(),
        }
    }
}

/// Named, ordered list of compiled rules
#[derive(Debug, Clone)]
pub struct LexerState {
    pub name: String,
    pub rules: Vec<Rule>,
}

/// Complete lexical definition of one dialect
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    id: String,
    ignore_case: bool,
    keywords: Vec<String>,
    operators: Vec<String>,
    symbols: String,
    brackets: Vec<BracketPair>,
    quotes: Vec<String>,
    states: HashMap<String, LexerState>,
    /// Declaration order of `states`, root first
    state_order: Vec<String>,
    /// Unexpanded declarations, kept for host adapters
    declarations: Vec<(String, Vec<RuleSpec>)>,
    keyword_set: HashSet<String>,
    operator_set: HashSet<String>,
}

impl LanguageDefinition {
    /// Start building a definition for `id`
    pub fn builder(id: &str) -> LanguageBuilder {
        LanguageBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Keywords in declaration order
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Operators in declaration order
    pub fn operators(&self) -> &[String] {
        &self.operators
    }

    /// Source of the `@symbols` pattern
    pub fn symbols(&self) -> &str {
        &self.symbols
    }

    pub fn brackets(&self) -> &[BracketPair] {
        &self.brackets
    }

    /// Quote characters that open string literals
    pub fn quotes(&self) -> &[String] {
        &self.quotes
    }

    pub fn state(&self, name: &str) -> Option<&LexerState> {
        self.states.get(name)
    }

    /// State names in declaration order
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.state_order.iter().map(String::as_str)
    }

    /// Rule declarations as written, includes unexpanded
    pub fn declarations(&self) -> &[(String, Vec<RuleSpec>)] {
        &self.declarations
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.keyword_set.contains(self.fold(text).as_ref())
    }

    pub fn is_operator(&self, text: &str) -> bool {
        self.operator_set.contains(self.fold(text).as_ref())
    }

    /// Resolve the kind a rule action yields for `text`
    pub(crate) fn classify(&self, action: Action, text: &str) -> super::TokenKind {
        match action {
            Action::Emit(kind) => kind,
            Action::Keywords { hit, miss } => {
                if self.is_keyword(text) {
                    hit
                } else {
                    miss
                }
            }
            Action::Operators { hit, miss } => {
                if self.is_operator(text) {
                    hit
                } else {
                    miss
                }
            }
        }
    }

    fn fold<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        if self.ignore_case {
            std::borrow::Cow::Owned(text.to_lowercase())
        } else {
            std::borrow::Cow::Borrowed(text)
        }
    }
}

/// Builder for [`LanguageDefinition`]
#[derive(Debug, Clone)]
pub struct LanguageBuilder {
    id: String,
    ignore_case: bool,
    keywords: Vec<String>,
    operators: Vec<String>,
    symbols: String,
    brackets: Vec<BracketPair>,
    quotes: Vec<String>,
    states: Vec<(String, Vec<RuleSpec>)>,
}

impl LanguageBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ignore_case: false,
            keywords: Vec::new(),
            operators: Vec::new(),
            symbols: String::new(),
            brackets: Vec::new(),
            quotes: Vec::new(),
            states: Vec::new(),
        }
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords
            .extend(keywords.iter().map(|k| k.to_string()));
        self
    }

    pub fn operators(mut self, operators: &[&str]) -> Self {
        self.operators
            .extend(operators.iter().map(|o| o.to_string()));
        self
    }

    /// Pattern substituted for `@symbols` in rule patterns
    pub fn symbols(mut self, pattern: &str) -> Self {
        self.symbols = pattern.to_string();
        self
    }

    pub fn bracket(mut self, open: &str, close: &str, token: &str) -> Self {
        self.brackets.push(BracketPair::new(open, close, token));
        self
    }

    pub fn quote(mut self, quote: &str) -> Self {
        self.quotes.push(quote.to_string());
        self
    }

    pub fn state(mut self, name: &str, rules: Vec<RuleSpec>) -> Self {
        self.states.push((name.to_string(), rules));
        self
    }

    /// Validate the declarations and compile every pattern
    pub fn build(self) -> Result<LanguageDefinition> {
        let mut declared: HashMap<&str, &[RuleSpec]> = HashMap::new();
        for (name, rules) in &self.states {
            if declared.insert(name.as_str(), rules.as_slice()).is_some() {
                return Err(LexerError::DuplicateState(name.clone()).into());
            }
        }
        if !declared.contains_key(ROOT_STATE) {
            return Err(LexerError::MissingRootState {
                language: self.id.clone(),
            }
            .into());
        }

        let mut states = HashMap::with_capacity(self.states.len());
        for (name, _) in &self.states {
            let mut rules = Vec::new();
            let mut visiting = vec![name.as_str()];
            self.expand(name, &declared, &mut visiting, &mut rules)?;
            states.insert(
                name.clone(),
                LexerState {
                    name: name.clone(),
                    rules,
                },
            );
        }

        let mut state_order: Vec<String> = self.states.iter().map(|(n, _)| n.clone()).collect();
        if let Some(pos) = state_order.iter().position(|n| n == ROOT_STATE) {
            let root = state_order.remove(pos);
            state_order.insert(0, root);
        }

        let fold = |s: &String| {
            if self.ignore_case {
                s.to_lowercase()
            } else {
                s.clone()
            }
        };
        let keyword_set = self.keywords.iter().map(fold).collect();
        let operator_set = self.operators.iter().map(fold).collect();

        Ok(LanguageDefinition {
            id: self.id,
            ignore_case: self.ignore_case,
            keywords: self.keywords,
            operators: self.operators,
            symbols: self.symbols,
            brackets: self.brackets,
            quotes: self.quotes,
            states,
            state_order,
            declarations: self.states,
            keyword_set,
            operator_set,
        })
    }

    /// Compile the rules of `name` into `out`, splicing includes in place
    fn expand<'a>(
        &self,
        name: &'a str,
        declared: &HashMap<&'a str, &'a [RuleSpec]>,
        visiting: &mut Vec<&'a str>,
        out: &mut Vec<Rule>,
    ) -> Result<()> {
        let Some(specs) = declared.get(name) else {
            return Err(LexerError::UnknownState {
                from: visiting.first().copied().unwrap_or(name).to_string(),
                target: name.to_string(),
            }
            .into());
        };

        for spec in specs.iter() {
            match spec {
                RuleSpec::Include(target) => {
                    let Some((&key, _)) = declared.get_key_value(target.as_str()) else {
                        return Err(LexerError::UnknownState {
                            from: name.to_string(),
                            target: target.clone(),
                        }
                        .into());
                    };
                    if visiting.contains(&key) {
                        return Err(LexerError::IncludeCycle(target.clone()).into());
                    }
                    visiting.push(key);
                    self.expand(key, declared, visiting, out)?;
                    visiting.pop();
                }
                RuleSpec::Match {
                    pattern,
                    action,
                    transition,
                } => {
                    if let Transition::Push(target) = transition {
                        if !declared.contains_key(target.as_str()) {
                            return Err(LexerError::UnknownState {
                                from: name.to_string(),
                                target: target.clone(),
                            }
                            .into());
                        }
                    }
                    out.push(self.compile(name, pattern, *action, transition.clone())?);
                }
            }
        }
        Ok(())
    }

    fn compile(
        &self,
        state: &str,
        pattern: &str,
        action: Action,
        transition: Transition,
    ) -> Result<Rule> {
        let source = pattern.replace("@symbols", &format!("(?:{})", self.symbols));
        let regex = RegexBuilder::new(&format!("^(?:{})", ascii_classes(&source)))
            .case_insensitive(self.ignore_case)
            .build()
            .map_err(|e| LexerError::InvalidPattern {
                state: state.to_string(),
                pattern: source.clone(),
                message: e.to_string(),
            })?;

        Ok(Rule {
            source,
            regex,
            action,
            transition,
        })
    }
}


/// Rewrite `source` so `\w`, `\d`, positive classes and ASCII letters match
/// ASCII only, the way patterns without the JavaScript `u` flag behave.
///
/// Negated classes and `.` still match any other character. `\s` stays
/// Unicode-aware, as it is in JavaScript.
fn ascii_classes(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let end = escape_end(&chars, i);
                let escape: String = chars[i..end].iter().collect();
                if escape == "\\w" || escape == "\\d" {
                    out.push_str(&format!("(?-u:{escape})"));
                } else {
                    out.push_str(&escape);
                }
                i = end;
            }
            '[' => {
                let end = class_end(&chars, i);
                let class: String = chars[i..end].iter().collect();
                if chars.get(i + 1) == Some(&'^') || !class.is_ascii() {
                    out.push_str(&class);
                } else {
                    out.push_str(&format!("(?-u:{class})"));
                }
                i = end;
            }
            '(' if chars.get(i + 1) == Some(&'?') => {
                // Group flags and names are copied as written
                let stop = if matches!(chars.get(i + 2), Some('P' | '<')) {
                    '>'
                } else {
                    ':'
                };
                let end = chars[i..]
                    .iter()
                    .position(|&c| c == stop || c == ')')
                    .map_or(chars.len(), |n| i + n + 1);
                out.extend(&chars[i..end]);
                i = end;
            }
            c if c.is_ascii_alphabetic() => {
                out.push_str(&format!("(?-u:{c})"));
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Index just past the escape starting at `start`
fn escape_end(chars: &[char], start: usize) -> usize {
    let Some(&kind) = chars.get(start + 1) else {
        return chars.len();
    };
    let after = start + 2;
    match kind {
        'p' | 'P' | 'x' | 'u' if chars.get(after) == Some(&'{') => chars[after..]
            .iter()
            .position(|&c| c == '}')
            .map_or(chars.len(), |n| after + n + 1),
        'p' | 'P' => (after + 1).min(chars.len()),
        'x' => (after + 2).min(chars.len()),
        'u' => (after + 4).min(chars.len()),
        _ => after,
    }
}

/// Index just past the class opened at `start`
fn class_end(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    if chars.get(i) == Some(&'^') {
        i += 1;
    }
    // A leading `]` is a literal
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    while i < chars.len() {
        match chars[i] {
            '\\' => i = escape_end(chars, i),
            ']' => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryLangError;
    use crate::lexer::TokenKind;

    fn minimal() -> LanguageBuilder {
        LanguageDefinition::builder("demo")
            .keywords(&["AND"])
            .operators(&["="])
            .symbols("[=!]+")
            .state("root", vec![RuleSpec::emit(r"\s+", TokenKind::Whitespace)])
    }

    #[test]
    fn test_build_minimal() {
        let def = minimal().build().unwrap();
        assert_eq!(def.id(), "demo");
        assert_eq!(def.state(ROOT_STATE).unwrap().rules.len(), 1);
        assert!(def.is_keyword("AND"));
        assert!(!def.is_keyword("and"));
    }

    #[test]
    fn test_ignore_case_folds_membership() {
        let def = minimal().ignore_case(true).build().unwrap();
        assert!(def.is_keyword("and"));
        assert!(def.is_keyword("AnD"));
    }

    #[test]
    fn test_missing_root() {
        let err = LanguageDefinition::builder("demo")
            .state("string", vec![])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            QueryLangError::Lexer(LexerError::MissingRootState { .. })
        ));
    }

    #[test]
    fn test_unknown_push_target() {
        let err = LanguageDefinition::builder("demo")
            .state("root", vec![RuleSpec::push("'", TokenKind::String, "string")])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            QueryLangError::Lexer(LexerError::UnknownState { ref target, .. }) if target == "string"
        ));
    }

    #[test]
    fn test_include_cycle() {
        let err = LanguageDefinition::builder("demo")
            .state("root", vec![RuleSpec::include("a")])
            .state("a", vec![RuleSpec::include("b")])
            .state("b", vec![RuleSpec::include("a")])
            .build()
            .unwrap_err();
        assert!(matches!(err, QueryLangError::Lexer(LexerError::IncludeCycle(_))));
    }

    #[test]
    fn test_include_splices_rules() {
        let def = LanguageDefinition::builder("demo")
            .state("whitespace", vec![RuleSpec::emit(r"\s+", TokenKind::Whitespace)])
            .state(
                "root",
                vec![
                    RuleSpec::emit(r"\d+", TokenKind::Number),
                    RuleSpec::include("whitespace"),
                ],
            )
            .build()
            .unwrap();
        let root = def.state(ROOT_STATE).unwrap();
        assert_eq!(root.rules.len(), 2);
        assert_eq!(root.rules[1].source(), r"\s+");
        assert_eq!(def.state_names().next(), Some("root"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = LanguageDefinition::builder("demo")
            .state("root", vec![RuleSpec::emit("(", TokenKind::Invalid)])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            QueryLangError::Lexer(LexerError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_symbols_expansion() {
        let def = minimal()
            .state(
                "ops",
                vec![RuleSpec::operators(
                    "@symbols",
                    TokenKind::Operator,
                    TokenKind::Unstyled,
                )],
            )
            .build()
            .unwrap();
        assert_eq!(def.state("ops").unwrap().rules[0].source(), "(?:[=!]+)");
    }

    #[test]
    fn test_ascii_classes_rewrite() {
        assert_eq!(ascii_classes(r"[a-z_]\w*"), r"(?-u:[a-z_])(?-u:\w)*");
        assert_eq!(ascii_classes(r"\d+\.\s"), r"(?-u:\d)+\.\s");
        assert_eq!(ascii_classes(r"[^']+"), r"[^']+");
        assert_eq!(ascii_classes(r"(?:[=!]+)"), r"(?:(?-u:[=!])+)");
        assert_eq!(ascii_classes("eq"), "(?-u:e)(?-u:q)");
        assert_eq!(ascii_classes(r"\x41\p{L}"), r"\x41\p{L}");
    }

    #[test]
    fn test_patterns_match_ascii_only() {
        let def = LanguageDefinition::builder("demo")
            .ignore_case(true)
            .state(
                "root",
                vec![
                    RuleSpec::emit(r"[a-z]\w*", TokenKind::Identifier),
                    RuleSpec::emit(r"\d+", TokenKind::Number),
                    RuleSpec::emit(r"\s+", TokenKind::Whitespace),
                ],
            )
            .build()
            .unwrap();
        let root = def.state(ROOT_STATE).unwrap();

        assert_eq!(root.rules[0].match_len("Abc"), Some(3));
        assert_eq!(root.rules[0].match_len("né"), Some(1));
        assert_eq!(root.rules[0].match_len("\u{212A}"), None);
        assert_eq!(root.rules[0].match_len("\u{17F}"), None);
        assert_eq!(root.rules[1].match_len("\u{663}"), None);
        // Unicode spaces stay whitespace
        assert_eq!(root.rules[2].match_len("\u{A0}x"), Some(2));
    }
}
