use std::{fmt, io};

/// Crate-wide `Result` type using [`QueryLangError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, QueryLangError>;

/// Top-level error type for the query language crate.
#[derive(Debug)]
pub enum QueryLangError {
    /// Language definition errors.
    Lexer(LexerError),

    /// Dynamic completion errors.
    Completion(CompletionError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Errors raised while building a [`LanguageDefinition`](crate::lexer::LanguageDefinition).
#[derive(Debug)]
pub enum LexerError {
    /// A rule pattern failed to compile.
    InvalidPattern {
        state: String,
        pattern: String,
        message: String,
    },

    /// A push transition or include names a state that was never declared.
    UnknownState { from: String, target: String },

    /// The definition has no `root` state.
    MissingRootState { language: String },

    /// The same state name was declared twice.
    DuplicateState(String),

    /// Include references form a cycle.
    IncludeCycle(String),

    /// The dialect name is not one of the supported dialects.
    UnknownDialect(String),
}

/// Errors from the dynamic completion path.
#[derive(Debug)]
pub enum CompletionError {
    /// The field loader reported a failure.
    LoaderFailed(String),

    /// The field loader did not answer within the configured timeout.
    Timeout(u64),

    /// The request was superseded or cancelled.
    Cancelled,
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Any other configuration problem.
    Generic(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for QueryLangError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryLangError::Lexer(e) => write!(f, "Language definition error: {e}"),
            QueryLangError::Completion(e) => write!(f, "Completion error: {e}"),
            QueryLangError::Config(e) => write!(f, "Configuration error: {e}"),
            QueryLangError::Io(e) => write!(f, "I/O error: {e}"),
            QueryLangError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerError::InvalidPattern {
                state,
                pattern,
                message,
            } => write!(f, "invalid pattern /{pattern}/ in state '{state}': {message}"),
            LexerError::UnknownState { from, target } => {
                write!(f, "state '{from}' references undeclared state '{target}'")
            }
            LexerError::MissingRootState { language } => {
                write!(f, "language '{language}' declares no root state")
            }
            LexerError::DuplicateState(name) => write!(f, "state '{name}' declared twice"),
            LexerError::IncludeCycle(name) => {
                write!(f, "include cycle detected through state '{name}'")
            }
            LexerError::UnknownDialect(name) => write!(
                f,
                "unknown dialect '{name}' (expected klogs, mongodb or signalsciences)"
            ),
        }
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::LoaderFailed(msg) => write!(f, "field loader failed: {msg}"),
            CompletionError::Timeout(ms) => write!(f, "field loader timed out after {ms}ms"),
            CompletionError::Cancelled => write!(f, "completion request cancelled"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for QueryLangError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryLangError::Lexer(e) => Some(e),
            QueryLangError::Completion(e) => Some(e),
            QueryLangError::Config(e) => Some(e),
            QueryLangError::Io(e) => Some(e),
            QueryLangError::Generic(_) => None,
        }
    }
}
impl std::error::Error for LexerError {}
impl std::error::Error for CompletionError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to QueryLangError ========================= */

impl From<io::Error> for QueryLangError {
    fn from(err: io::Error) -> Self {
        QueryLangError::Io(err)
    }
}

impl From<LexerError> for QueryLangError {
    fn from(err: LexerError) -> Self {
        QueryLangError::Lexer(err)
    }
}

impl From<CompletionError> for QueryLangError {
    fn from(err: CompletionError) -> Self {
        QueryLangError::Completion(err)
    }
}

impl From<ConfigError> for QueryLangError {
    fn from(err: ConfigError) -> Self {
        QueryLangError::Config(err)
    }
}

impl From<toml::de::Error> for QueryLangError {
    fn from(err: toml::de::Error) -> Self {
        QueryLangError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<toml::ser::Error> for QueryLangError {
    fn from(err: toml::ser::Error) -> Self {
        QueryLangError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<serde_json::Error> for QueryLangError {
    fn from(err: serde_json::Error) -> Self {
        QueryLangError::Generic(format!("JSON error: {err}"))
    }
}

impl From<String> for QueryLangError {
    fn from(msg: String) -> Self {
        QueryLangError::Generic(msg)
    }
}

impl From<&str> for QueryLangError {
    fn from(msg: &str) -> Self {
        QueryLangError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_error_display() {
        let err: QueryLangError = LexerError::UnknownState {
            from: "root".to_string(),
            target: "string".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Language definition error: state 'root' references undeclared state 'string'"
        );
    }

    #[test]
    fn test_completion_error_display() {
        assert_eq!(
            CompletionError::Timeout(250).to_string(),
            "field loader timed out after 250ms"
        );
    }

    #[test]
    fn test_io_conversion_keeps_source() {
        let err: QueryLangError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }
}
