//! Optional speech input
//!
//! Speech capture is a capability handed to the session at composition time.
//! Platforms without a recognizer get [`NoSpeechCapture`], which reports the
//! absence instead of capturing anything.

use crate::language::Language;
use async_trait::async_trait;

/// Notice surfaced when no recognizer is available
pub const UNAVAILABLE_NOTICE: &str = "Sorry, voice input is not supported here.";

/// Recognition locale used when the source language is auto-detected
pub const AUTO_RECOGNITION_LOCALE: &str = "en-US";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("Sorry, voice input is not supported here.")]
    Unavailable,
    #[error("Voice input failed: {0}")]
    Failed(String),
}

/// A speech recognizer producing a transcript
#[async_trait]
pub trait SpeechCapture: Send + Sync {
    fn is_available(&self) -> bool;

    /// Listen once and return the transcript
    async fn capture(&self, locale: &str) -> Result<String, CaptureError>;
}

/// Recognizer placeholder for platforms without speech support
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpeechCapture;

#[async_trait]
impl SpeechCapture for NoSpeechCapture {
    fn is_available(&self) -> bool {
        false
    }

    async fn capture(&self, _locale: &str) -> Result<String, CaptureError> {
        Err(CaptureError::Unavailable)
    }
}

/// Locale handed to the recognizer for a source selection
pub fn recognition_locale(source: Language) -> &'static str {
    if source.is_auto() {
        AUTO_RECOGNITION_LOCALE
    } else {
        source.code
    }
}
