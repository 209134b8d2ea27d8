//! Supported query dialects
//!
//! Each dialect is an independent [`LanguageDefinition`]; they share the
//! number pattern and the string sub-states but nothing else.

pub mod klogs;
pub mod mongodb;
pub mod signalsciences;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{LanguageDefinition, RuleSpec, TokenKind, Tokenizer};
use crate::error::{LexerError, QueryLangError, Result};

/// Integer and float literals, with optional exponent
pub(crate) const NUMBER: &str = r"((\d+(\.\d*)?)|(\.\d+))([eE][-+]?\d+)?";

/// Query dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Klogs,
    #[serde(alias = "mongo")]
    MongoDb,
    #[serde(alias = "sigsci")]
    SignalSciences,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Klogs, Dialect::MongoDb, Dialect::SignalSciences];

    /// Language id used when registering with an editor host
    pub fn id(&self) -> &'static str {
        match self {
            Dialect::Klogs => klogs::ID,
            Dialect::MongoDb => mongodb::ID,
            Dialect::SignalSciences => signalsciences::ID,
        }
    }

    /// Position in [`Dialect::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Dialect::Klogs => 0,
            Dialect::MongoDb => 1,
            Dialect::SignalSciences => 2,
        }
    }

    /// Build the language definition of this dialect
    pub fn definition(&self) -> Result<LanguageDefinition> {
        match self {
            Dialect::Klogs => klogs::definition(),
            Dialect::MongoDb => mongodb::definition(),
            Dialect::SignalSciences => signalsciences::definition(),
        }
    }

    /// Build a tokenizer for this dialect
    pub fn tokenizer(&self) -> Result<Tokenizer> {
        Ok(Tokenizer::new(self.definition()?))
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Dialect::Klogs => &["klogs", "KLogs"],
            Dialect::MongoDb => &["mongodb", "MongoDB", "mongo"],
            Dialect::SignalSciences => &["signalsciences", "SignalSciences", "sigsci"],
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Dialect::Klogs => &[".klogs"],
            Dialect::MongoDb => &[".mongodb"],
            Dialect::SignalSciences => &[".sigsci"],
        }
    }

    pub fn mimetypes(&self) -> &'static [&'static str] {
        match self {
            Dialect::Klogs => &["text/x-klogs"],
            Dialect::MongoDb => &["text/x-mongodb"],
            Dialect::SignalSciences => &["text/x-signalsciences"],
        }
    }

    /// Characters that make the host ask for completions eagerly
    pub fn trigger_characters(&self) -> &'static [char] {
        match self {
            Dialect::MongoDb => &['$'],
            _ => &[],
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Dialect {
    type Err = QueryLangError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "klogs" => Ok(Dialect::Klogs),
            "mongodb" | "mongo" => Ok(Dialect::MongoDb),
            "signalsciences" | "sigsci" => Ok(Dialect::SignalSciences),
            _ => Err(LexerError::UnknownDialect(s.to_string()).into()),
        }
    }
}

pub(crate) fn whitespace_rules() -> Vec<RuleSpec> {
    vec![RuleSpec::emit(r"[ \t\r\n]+", TokenKind::Whitespace)]
}

/// `'…'` with `''` as an embedded quote
pub(crate) fn single_quoted_rules() -> Vec<RuleSpec> {
    vec![
        RuleSpec::emit(r"[^']+", TokenKind::String),
        RuleSpec::emit(r"''", TokenKind::String),
        RuleSpec::pop(r"'", TokenKind::String),
    ]
}

/// `"…"` with backslash escapes
pub(crate) fn double_quoted_rules() -> Vec<RuleSpec> {
    vec![
        RuleSpec::emit(r#"[^\\"]+"#, TokenKind::String),
        RuleSpec::emit(r"\\.", TokenKind::String),
        RuleSpec::pop(r#"""#, TokenKind::String),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_definitions_build() {
        for dialect in Dialect::ALL {
            let definition = dialect.definition().unwrap();
            assert_eq!(definition.id(), dialect.id());
            assert_eq!(Dialect::ALL[dialect.index()], dialect);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("klogs".parse::<Dialect>().unwrap(), Dialect::Klogs);
        assert_eq!("Mongo".parse::<Dialect>().unwrap(), Dialect::MongoDb);
        assert_eq!("sigsci".parse::<Dialect>().unwrap(), Dialect::SignalSciences);
        assert!("sql".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_trigger_characters() {
        assert_eq!(Dialect::MongoDb.trigger_characters(), &['$']);
        assert!(Dialect::Klogs.trigger_characters().is_empty());
    }

    #[test]
    fn test_coverage_on_arbitrary_input() {
        let samples = [
            "",
            " ",
            "'",
            "\"",
            "''''",
            "a[b]c+d-e,f;g",
            "{$and: [{x: 1}, {y: 'a''b'}]}",
            "from:-1h status:>=400 \"unterminated",
            "\u{1F600} ünïcödé \t\r",
            "$$$ ### @@@ \\\\ ..",
        ];
        for dialect in Dialect::ALL {
            let tokenizer = dialect.tokenizer().unwrap();
            for line in samples {
                let tokens = tokenizer.tokenize(line);
                let rebuilt: String = tokens.iter().map(|t| t.text(line)).collect();
                assert_eq!(rebuilt, line, "{dialect}: {line:?}");
                assert_eq!(tokens, tokenizer.tokenize(line));
            }
        }
    }
}
