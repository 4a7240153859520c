//! Prompt construction
//!
//! Turns a [`TranslationRequest`] into the single user message sent to the
//! completion endpoint. Display names, not codes, go into the prompt.

use crate::request::TranslationRequest;

/// Appended to every instruction. The model is free to ignore it, so callers
/// still trim whatever comes back.
pub const REPLY_ONLY_DIRECTIVE: &str = "Only reply with the translated text, no explanations.";

/// Build the instruction for a validated request
pub fn build_instruction(request: &TranslationRequest) -> String {
    let target = request.target().name;
    let text = request.text();

    let prompt = if request.source().is_auto() {
        format!(
            "Detect the language and translate this text naturally to {}: \"{}\"",
            target, text
        )
    } else {
        format!(
            "Translate this text from {} to {} naturally and accurately: \"{}\"",
            request.source().name,
            target,
            text
        )
    };

    format!("{}\n\n{}", prompt, REPLY_ONLY_DIRECTIVE)
}
