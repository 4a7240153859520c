//! Completion provider trait
//!
//! `CompletionProvider` is the seam between the translation core and whatever
//! answers prompts: the OpenAI-compatible HTTP client in production, a mock in
//! tests. Implementations own their transport and perform exactly one
//! exchange per call.
//!
//! # Example
//!
//! ```ignore
//! use gpt_translator::{ClientConfig, CompletionProvider, OpenAiProvider, TranslationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAiProvider::new(ClientConfig::from_env()?)?;
//!     let request = TranslationRequest::from_codes("auto", "fr", "Hello")?;
//!     println!("{}", provider.translate(&request).await?);
//!     Ok(())
//! }
//! ```

use crate::error::TranslateResult;
use crate::prompt::build_instruction;
use crate::request::{MAX_TEXT_CHARS, TranslationRequest};
use async_trait::async_trait;

/// Returned when the model answers with nothing usable
pub const NO_TRANSLATION: &str = "No translation.";

/// Longest instruction accepted, in characters: the longest request text
/// plus room for the prompt wording around it
pub const MAX_INSTRUCTION_CHARS: usize = MAX_TEXT_CHARS + 1_000;

/// Anything that turns a prompt into generated text
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one instruction and return the model's reply, trimmed
    ///
    /// A well-formed reply without content yields [`NO_TRANSLATION`] rather
    /// than an error.
    async fn complete(&self, instruction: &str) -> TranslateResult<String>;

    /// Name used in logs
    fn provider_name(&self) -> &str;

    /// Build the prompt for `request` and complete it
    async fn translate(&self, request: &TranslationRequest) -> TranslateResult<String> {
        let instruction = build_instruction(request);
        tracing::debug!(
            provider = self.provider_name(),
            from = request.source().code,
            to = request.target().code,
            chars = request.text().chars().count(),
            "translating"
        );
        self.complete(&instruction).await
    }
}

/// Trim a reply and substitute the fallback when nothing is left
pub fn normalize_reply(content: Option<&str>) -> String {
    match content.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NO_TRANSLATION.to_string(),
    }
}
