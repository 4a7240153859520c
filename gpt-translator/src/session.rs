//! Translator session
//!
//! A [`TranslatorSession`] is everything one user sees: the input text, the
//! two language selections and the state of the latest translation. It is
//! the only mutable state in the system and is owned by whichever front end
//! presents it.
//!
//! ```text
//!   Idle ──submit──▶ Pending ──Ok──▶ Succeeded(text)
//!     ▲                 │
//!     │                 └──Err──▶ Failed(message)
//!     └─ Succeeded / Failed ──submit──▶ Pending
//! ```
//!
//! While Pending, `submit` and `swap` are rejected with [`SessionError::Busy`],
//! so at most one request is ever in flight per session. A submission that
//! will never be resolved is withdrawn with [`TranslatorSession::abandon`],
//! which puts back the state it replaced.

use crate::clipboard::{COPIED_NOTICE, Clipboard, ClipboardError};
use crate::error::TranslateError;
use crate::language::{self, DEFAULT_SOURCE, DEFAULT_TARGET, Language};
use crate::prompt::build_instruction;
use crate::provider::CompletionProvider;
use crate::request::TranslationRequest;
use crate::speech::{CaptureError, SpeechCapture, recognition_locale};

/// Shown before the first translation
pub const PLACEHOLDER: &str = "Translation will appear here...";

/// The only failure text users ever see; details go to the log
pub const FAILURE_MESSAGE: &str = "Translation failed. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TranslationState {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("A translation is already in progress")]
    Busy,
    #[error(transparent)]
    Invalid(#[from] TranslateError),
}

/// A request that has moved the session to Pending
///
/// The id ties the eventual outcome back to this submission; outcomes for any
/// other id are dropped by [`TranslatorSession::resolve`].
#[derive(Debug, Clone)]
pub struct Submission {
    id: u64,
    request: TranslationRequest,
    instruction: String,
}

impl Submission {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &TranslationRequest {
        &self.request
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }
}

#[derive(Debug)]
pub struct TranslatorSession {
    input: String,
    source: Language,
    target: Language,
    state: TranslationState,
    /// State replaced by the pending submission
    before_submit: TranslationState,
    pending: Option<u64>,
    next_id: u64,
}

/// Withdraws the submission if the exchange never reaches `resolve`
struct AbandonOnDrop<'a> {
    session: &'a mut TranslatorSession,
    id: u64,
}

impl Drop for AbandonOnDrop<'_> {
    fn drop(&mut self) {
        if self.session.pending == Some(self.id) {
            tracing::debug!(id = self.id, "translation dropped before completion");
            self.session.abandon();
        }
    }
}

impl Default for TranslatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslatorSession {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            source: DEFAULT_SOURCE,
            target: DEFAULT_TARGET,
            state: TranslationState::Idle,
            before_submit: TranslationState::Idle,
            pending: None,
            next_id: 1,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn source(&self) -> Language {
        self.source
    }

    pub fn target(&self) -> Language {
        self.target
    }

    /// Select the source language; `auto` is allowed
    pub fn set_source(&mut self, code: &str) -> Result<(), TranslateError> {
        self.source = language::source_language(code)?;
        Ok(())
    }

    /// Select the target language; `auto` is refused
    pub fn set_target(&mut self, code: &str) -> Result<(), TranslateError> {
        self.target = language::target_language(code)?;
        Ok(())
    }

    pub fn state(&self) -> &TranslationState {
        &self.state
    }

    /// Drives the busy indicator
    pub fn is_busy(&self) -> bool {
        self.state == TranslationState::Pending
    }

    /// Whether the submit action should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.input.trim().is_empty()
    }

    /// Text for the output pane
    pub fn display_text(&self) -> &str {
        match &self.state {
            TranslationState::Idle => PLACEHOLDER,
            TranslationState::Pending => "",
            TranslationState::Succeeded(text) => text,
            TranslationState::Failed(message) => message,
        }
    }

    /// The last successful translation, or empty
    pub fn output_text(&self) -> &str {
        match &self.state {
            TranslationState::Succeeded(text) => text,
            _ => "",
        }
    }

    /// Validate the current input and move to Pending
    ///
    /// On any error the state is left untouched and nothing should be sent.
    pub fn submit(&mut self) -> Result<Submission, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }

        let request = TranslationRequest::new(self.source, self.target, self.input.clone())?;
        let instruction = build_instruction(&request);

        let id = self.next_id;
        self.next_id += 1;
        self.pending = Some(id);
        self.before_submit = std::mem::replace(&mut self.state, TranslationState::Pending);

        Ok(Submission {
            id,
            request,
            instruction,
        })
    }

    /// Apply the outcome of submission `id`
    ///
    /// Returns false when the outcome no longer belongs to the pending
    /// submission and was dropped.
    pub fn resolve(&mut self, id: u64, outcome: Result<String, TranslateError>) -> bool {
        if self.pending != Some(id) {
            tracing::debug!(id, "discarding stale translation outcome");
            return false;
        }
        self.pending = None;
        self.before_submit = TranslationState::Idle;

        self.state = match outcome {
            Ok(text) => TranslationState::Succeeded(text),
            Err(err) => {
                tracing::error!(error = %err, "translation failed");
                TranslationState::Failed(FAILURE_MESSAGE.to_string())
            }
        };
        true
    }

    /// Withdraw the pending submission and restore the state it replaced
    ///
    /// Its outcome, if one still arrives, is discarded. Returns false when
    /// nothing was pending.
    pub fn abandon(&mut self) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        self.state = std::mem::take(&mut self.before_submit);
        true
    }

    /// Submit, run one exchange with `provider`, and resolve
    ///
    /// Dropping the returned future before it completes abandons the
    /// submission, so the session never stays Pending.
    pub async fn translate(&mut self, provider: &dyn CompletionProvider) -> Result<(), SessionError> {
        let submission = self.submit()?;
        tracing::debug!(
            provider = provider.provider_name(),
            from = submission.request().source().code,
            to = submission.request().target().code,
            "submitting translation"
        );
        let mut guard = AbandonOnDrop {
            session: self,
            id: submission.id(),
        };
        let outcome = provider.complete(submission.instruction()).await;
        guard.session.resolve(submission.id(), outcome);
        Ok(())
    }

    /// Exchange language selections and the input/output texts
    ///
    /// `auto` can only sit on the source side, so whichever side would
    /// receive it as a target gets [`DEFAULT_TARGET`] instead.
    pub fn swap(&mut self) -> Result<(), SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }

        let old_source = self.source;
        let old_target = self.target;
        self.source = if old_target.is_auto() {
            DEFAULT_TARGET
        } else {
            old_target
        };
        self.target = if old_source.is_auto() {
            DEFAULT_TARGET
        } else {
            old_source
        };

        let old_output = self.output_text().to_string();
        let old_input = std::mem::replace(&mut self.input, old_output);
        self.state = if old_input.is_empty() {
            TranslationState::Idle
        } else {
            TranslationState::Succeeded(old_input)
        };

        Ok(())
    }

    /// Replace the input with one spoken transcript
    pub async fn dictate(&mut self, speech: &dyn SpeechCapture) -> Result<(), CaptureError> {
        if !speech.is_available() {
            return Err(CaptureError::Unavailable);
        }

        let transcript = speech.capture(recognition_locale(self.source)).await?;
        self.input = transcript;
        Ok(())
    }

    /// Copy the output text verbatim; returns the notice to show
    pub fn copy_output(&self, clipboard: &dyn Clipboard) -> Result<&'static str, ClipboardError> {
        clipboard.write_text(self.output_text())?;
        Ok(COPIED_NOTICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::mock::{MockMode, MockProvider};
    use crate::request::{EMPTY_INPUT_MESSAGE, MAX_TEXT_CHARS};
    use crate::speech::NoSpeechCapture;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn session(source: &str, target: &str, input: &str) -> TranslatorSession {
        let mut session = TranslatorSession::new();
        session.set_source(source).unwrap();
        session.set_target(target).unwrap();
        session.set_input(input);
        session
    }

    // ========== Defaults and selection ==========

    #[test]
    fn test_new_session_defaults() {
        let session = TranslatorSession::new();
        assert!(session.source().is_auto());
        assert_eq!(session.target().code, "en");
        assert_eq!(session.state(), &TranslationState::Idle);
        assert_eq!(session.display_text(), PLACEHOLDER);
        assert!(!session.can_submit());
    }

    #[test]
    fn test_target_cannot_be_auto() {
        let mut session = TranslatorSession::new();
        assert!(session.set_target("auto").is_err());
        assert_eq!(session.target().code, "en");
        assert!(session.set_target("xx").is_err());
    }

    // ========== Submit / resolve ==========

    #[tokio::test]
    async fn test_successful_translation() {
        let provider = MockProvider::new(MockMode::Reply(" Bonjour ".to_string()));
        let mut session = session("auto", "fr", "Hello");

        session.translate(&provider).await.unwrap();

        assert_eq!(session.state(), &TranslationState::Succeeded("Bonjour".to_string()));
        assert_eq!(session.display_text(), "Bonjour");
        assert_eq!(provider.calls(), 1);
        let instruction = provider.last_instruction().unwrap();
        assert!(instruction.starts_with("Detect the language"));
        assert!(instruction.contains("French"));
    }

    #[tokio::test]
    async fn test_empty_reply_shows_fallback() {
        let provider = MockProvider::new(MockMode::Empty);
        let mut session = session("en", "de", "Hello");

        session.translate(&provider).await.unwrap();
        assert_eq!(session.display_text(), "No translation.");
    }

    #[tokio::test]
    async fn test_api_failure_shows_generic_message() {
        let provider = MockProvider::new(MockMode::Error(TranslateError::Api {
            status: 500,
            body: "secret upstream details".to_string(),
        }));
        let mut session = session("en", "de", "Hello");

        session.translate(&provider).await.unwrap();

        assert_eq!(session.state(), &TranslationState::Failed(FAILURE_MESSAGE.to_string()));
        assert_eq!(session.display_text(), FAILURE_MESSAGE);
        assert!(!session.display_text().contains("secret"));
        assert_eq!(session.output_text(), "");
    }

    #[tokio::test]
    async fn test_every_failure_kind_collapses_to_failed() {
        for err in [
            TranslateError::Transport("timeout".to_string()),
            TranslateError::Parse("bad json".to_string()),
            TranslateError::Api {
                status: 401,
                body: "no".to_string(),
            },
        ] {
            let provider = MockProvider::new(MockMode::Error(err));
            let mut session = session("en", "fr", "Hi");
            session.translate(&provider).await.unwrap();
            assert_eq!(session.display_text(), FAILURE_MESSAGE);
        }
    }

    #[tokio::test]
    async fn test_blank_input_never_calls_provider() {
        let provider = MockProvider::new(MockMode::Echo);

        for input in ["", "   ", "\n\t"] {
            let mut session = session("auto", "fr", input);
            assert!(!session.can_submit());

            match session.translate(&provider).await {
                Err(SessionError::Invalid(TranslateError::Validation(msg))) => {
                    assert_eq!(msg, EMPTY_INPUT_MESSAGE)
                }
                other => panic!("Expected validation error, got {:?}", other),
            }
            assert_eq!(session.state(), &TranslationState::Idle);
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_input_keeps_previous_result() {
        let provider = MockProvider::new(MockMode::Reply("Hallo".to_string()));
        let mut session = session("en", "de", "Hello");
        session.translate(&provider).await.unwrap();

        session.set_input("  ");
        assert!(session.translate(&provider).await.is_err());
        assert_eq!(session.state(), &TranslationState::Succeeded("Hallo".to_string()));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_oversized_input_stays_out_of_pending() {
        let provider = MockProvider::new(MockMode::Echo);
        let mut session = session("en", "fr", &"x".repeat(MAX_TEXT_CHARS + 10));

        match session.submit() {
            Err(SessionError::Invalid(TranslateError::Validation(msg))) => {
                assert!(msg.contains("maximum length"))
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert_eq!(session.state(), &TranslationState::Idle);

        assert!(session.translate(&provider).await.is_err());
        assert_eq!(session.state(), &TranslationState::Idle);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_dropped_translation_does_not_leave_session_busy() {
        let slow = MockProvider::with_delay(MockMode::Reply("Bonjour".to_string()), 200);
        let mut session = session("en", "fr", "Hello");

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            session.translate(&slow),
        )
        .await;
        assert!(timed_out.is_err());

        assert_eq!(session.state(), &TranslationState::Idle);
        assert!(!session.is_busy());
        session.swap().unwrap();
        session.swap().unwrap();

        let fast = MockProvider::new(MockMode::Reply("Salut".to_string()));
        session.translate(&fast).await.unwrap();
        assert_eq!(session.display_text(), "Salut");
    }

    #[tokio::test]
    async fn test_dropped_translation_restores_previous_result() {
        let mut session = session("en", "fr", "Hello");
        session
            .translate(&MockProvider::new(MockMode::Reply("Bonjour".to_string())))
            .await
            .unwrap();

        let slow = MockProvider::with_delay(MockMode::Reply("Salut".to_string()), 200);
        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            session.translate(&slow),
        )
        .await;
        assert!(timed_out.is_err());

        assert_eq!(session.state(), &TranslationState::Succeeded("Bonjour".to_string()));
        assert!(session.can_submit());
    }

    #[test]
    fn test_abandon_withdraws_pending_submission() {
        let mut session = session("en", "fr", "Hello");
        assert!(!session.abandon());

        let submission = session.submit().unwrap();
        assert!(session.abandon());
        assert_eq!(session.state(), &TranslationState::Idle);

        // The late outcome of the withdrawn submission is ignored
        assert!(!session.resolve(submission.id(), Ok("Bonjour".to_string())));
        assert_eq!(session.state(), &TranslationState::Idle);

        let next = session.submit().unwrap();
        assert!(session.resolve(next.id(), Ok("Bonjour".to_string())));
        assert_eq!(session.display_text(), "Bonjour");
    }

    #[test]
    fn test_pending_rejects_resubmission() {
        let mut session = session("en", "fr", "Hello");

        let submission = session.submit().unwrap();
        assert!(session.is_busy());
        assert!(!session.can_submit());
        assert_eq!(session.display_text(), "");
        assert_eq!(session.submit().unwrap_err(), SessionError::Busy);

        assert!(session.resolve(submission.id(), Ok("Bonjour".to_string())));
        assert!(!session.is_busy());
        assert!(session.can_submit());
    }

    #[test]
    fn test_resubmit_from_failed_and_succeeded() {
        let mut session = session("en", "fr", "Hello");

        let first = session.submit().unwrap();
        session.resolve(first.id(), Err(TranslateError::Transport("down".to_string())));
        assert!(matches!(session.state(), TranslationState::Failed(_)));

        let second = session.submit().unwrap();
        assert_eq!(session.state(), &TranslationState::Pending);
        session.resolve(second.id(), Ok("Bonjour".to_string()));

        let third = session.submit().unwrap();
        assert_eq!(session.state(), &TranslationState::Pending);
        assert!(third.id() > second.id());
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut session = session("en", "fr", "Hello");

        let submission = session.submit().unwrap();
        assert!(session.resolve(submission.id(), Ok("Bonjour".to_string())));
        // A late duplicate of the same outcome changes nothing
        assert!(!session.resolve(submission.id(), Ok("Salut".to_string())));
        assert_eq!(session.display_text(), "Bonjour");

        // An outcome for an id that was never issued is dropped too
        let pending = session.submit().unwrap();
        assert!(!session.resolve(pending.id() + 10, Ok("x".to_string())));
        assert!(session.is_busy());
    }

    #[test]
    fn test_submission_carries_request_and_instruction() {
        let mut session = session("es", "en", "  Hola  ");
        let submission = session.submit().unwrap();
        assert_eq!(submission.request().text(), "  Hola  ");
        assert!(submission.instruction().contains("from Spanish to English"));
    }

    #[test]
    fn test_output_preserves_whitespace() {
        let mut session = session("en", "fr", "Hello");
        let submission = session.submit().unwrap();
        session.resolve(submission.id(), Ok("ligne un\n  ligne deux".to_string()));
        assert_eq!(session.display_text(), "ligne un\n  ligne deux");
    }

    // ========== Swap ==========

    #[test]
    fn test_swap_exchanges_languages_and_texts() {
        let mut session = session("de", "fr", "Hallo");
        let submission = session.submit().unwrap();
        session.resolve(submission.id(), Ok("Bonjour".to_string()));

        session.swap().unwrap();

        assert_eq!(session.source().code, "fr");
        assert_eq!(session.target().code, "de");
        assert_eq!(session.input(), "Bonjour");
        assert_eq!(session.output_text(), "Hallo");
    }

    #[test]
    fn test_swap_twice_restores() {
        let mut session = session("ja", "ko", "こんにちは");
        let submission = session.submit().unwrap();
        session.resolve(submission.id(), Ok("안녕하세요".to_string()));

        session.swap().unwrap();
        session.swap().unwrap();

        assert_eq!(session.source().code, "ja");
        assert_eq!(session.target().code, "ko");
        assert_eq!(session.input(), "こんにちは");
        assert_eq!(session.output_text(), "안녕하세요");
    }

    #[test]
    fn test_swap_with_auto_source_falls_back_to_default_target() {
        let mut session = session("auto", "fr", "Hello");
        session.swap().unwrap();

        assert_eq!(session.source().code, "fr");
        assert_eq!(session.target(), DEFAULT_TARGET);
        assert!(!session.target().is_auto());
    }

    #[test]
    fn test_swap_without_output() {
        let mut session = session("en", "fr", "Hello");
        session.swap().unwrap();
        assert_eq!(session.input(), "");
        assert_eq!(session.output_text(), "Hello");

        let mut empty = TranslatorSession::new();
        empty.swap().unwrap();
        assert_eq!(empty.state(), &TranslationState::Idle);
    }

    #[test]
    fn test_swap_rejected_while_pending() {
        let mut session = session("en", "fr", "Hello");
        session.submit().unwrap();
        assert_eq!(session.swap().unwrap_err(), SessionError::Busy);
        assert_eq!(session.source().code, "en");
        assert_eq!(session.input(), "Hello");
    }

    // ========== Speech ==========

    struct ScriptedSpeech {
        transcript: &'static str,
        locales: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SpeechCapture for ScriptedSpeech {
        fn is_available(&self) -> bool {
            true
        }

        async fn capture(&self, locale: &str) -> Result<String, CaptureError> {
            self.locales.lock().unwrap().push(locale.to_string());
            Ok(self.transcript.to_string())
        }
    }

    #[tokio::test]
    async fn test_dictate_without_capability_is_noop() {
        let mut session = session("en", "fr", "typed");
        let result = session.dictate(&NoSpeechCapture).await;
        assert_eq!(result, Err(CaptureError::Unavailable));
        assert_eq!(session.input(), "typed");
    }

    #[tokio::test]
    async fn test_dictate_replaces_input() {
        let speech = ScriptedSpeech {
            transcript: "good morning",
            locales: Mutex::new(Vec::new()),
        };

        let mut session = session("auto", "fr", "typed");
        session.dictate(&speech).await.unwrap();
        assert_eq!(session.input(), "good morning");

        session.set_source("it").unwrap();
        session.dictate(&speech).await.unwrap();
        assert_eq!(*speech.locales.lock().unwrap(), vec!["en-US", "it"]);
    }

    // ========== Clipboard ==========

    #[test]
    fn test_copy_output_verbatim() {
        let mut session = session("en", "fr", "Hello");
        let submission = session.submit().unwrap();
        session.resolve(submission.id(), Ok(" Bonjour \n".to_string()));

        let clipboard = MemoryClipboard::default();
        assert_eq!(session.copy_output(&clipboard).unwrap(), COPIED_NOTICE);
        assert_eq!(clipboard.contents(), " Bonjour \n");
    }
}
