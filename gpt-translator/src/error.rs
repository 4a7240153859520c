/// Error types for the translation core
///
/// Every failure of a translate cycle lands in one of these variants. The
/// session collapses all of them into a single generic message for the user;
/// the variant and its details only reach the log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// Input rejected before any request was issued
    #[error("{0}")]
    Validation(String),
    /// Network unreachable, connection reset, timeout
    #[error("Transport error: {0}")]
    Transport(String),
    /// The endpoint answered with a non-2xx status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    /// The endpoint answered 2xx but the payload had an unexpected shape
    #[error("Parse error: {0}")]
    Parse(String),
    /// Provider could not be constructed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TranslateError {
    /// True for errors caused by user input rather than the exchange itself
    pub fn is_validation(&self) -> bool {
        matches!(self, TranslateError::Validation(_))
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TranslateError::Parse(err.to_string())
        } else {
            TranslateError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TranslateError {
    fn from(err: serde_json::Error) -> Self {
        TranslateError::Parse(err.to_string())
    }
}

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;
