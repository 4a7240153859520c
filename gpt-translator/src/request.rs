use crate::error::{TranslateError, TranslateResult};
use crate::language::{self, Language};

/// Message shown when the user submits nothing to translate
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text!";

/// Longest text accepted for one translation, in characters
pub const MAX_TEXT_CHARS: usize = 30_000;

/// A translation ready to be turned into a prompt
///
/// Construction is the only validation point: a value of this type always has
/// non-blank text of at most [`MAX_TEXT_CHARS`] characters and a concrete
/// (non-`auto`) target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    source: Language,
    target: Language,
    text: String,
}

impl TranslationRequest {
    /// Validate and build a request
    ///
    /// The text is kept as typed; only the emptiness check trims it.
    pub fn new(source: Language, target: Language, text: impl Into<String>) -> TranslateResult<Self> {
        let text = text.into();

        if text.trim().is_empty() {
            return Err(TranslateError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
        }

        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(TranslateError::Validation(format!(
                "Text exceeds maximum length of {} characters",
                MAX_TEXT_CHARS
            )));
        }

        if target.is_auto() {
            return Err(TranslateError::Validation(
                "Target language cannot be auto-detected".to_string(),
            ));
        }

        Ok(Self {
            source,
            target,
            text,
        })
    }

    /// Build a request from raw language codes, as received over the wire
    pub fn from_codes(source: &str, target: &str, text: impl Into<String>) -> TranslateResult<Self> {
        let source = language::source_language(source)?;
        let target = language::target_language(target)?;
        Self::new(source, target, text)
    }

    pub fn source(&self) -> Language {
        self.source
    }

    pub fn target(&self) -> Language {
        self.target
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
