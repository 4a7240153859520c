//! Mock completion provider for testing
//!
//! Deterministic, network-free stand-in for [`OpenAiProvider`](crate::OpenAiProvider).
//! It records every instruction it receives so tests can assert on what
//! would have been sent, and how many exchanges happened.
//!
//! # Example
//!
//! ```ignore
//! use gpt_translator::{CompletionProvider, MockMode, MockProvider};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockProvider::new(MockMode::Reply(" Bonjour ".to_string()));
//!     assert_eq!(mock.complete("...").await.unwrap(), "Bonjour");
//!     assert_eq!(mock.calls(), 1);
//! }
//! ```

use crate::error::TranslateResult;
use crate::provider::{CompletionProvider, normalize_reply};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Raw model content; trimmed and defaulted like a real reply
    Reply(String),

    /// A reply with no content at all
    Empty,

    /// Reply with the instruction itself
    Echo,

    /// Fail every call with this error
    Error(crate::error::TranslateError),
}

/// Mock provider that simulates completion replies
#[derive(Debug)]
pub struct MockProvider {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    instructions: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            instructions: Mutex::new(Vec::new()),
        }
    }

    /// Same as [`MockProvider::new`] with every call delayed
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// Number of exchanges performed so far
    pub fn calls(&self) -> usize {
        self.instructions.lock().map(|i| i.len()).unwrap_or_default()
    }

    /// Instruction received by the most recent exchange
    pub fn last_instruction(&self) -> Option<String> {
        self.instructions
            .lock()
            .ok()
            .and_then(|i| i.last().cloned())
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, instruction: &str) -> TranslateResult<String> {
        if let Ok(mut instructions) = self.instructions.lock() {
            instructions.push(instruction.to_string());
        }

        self.apply_delay().await;

        match &self.mode {
            MockMode::Reply(content) => Ok(normalize_reply(Some(content.as_str()))),
            MockMode::Empty => Ok(normalize_reply(None)),
            MockMode::Echo => Ok(instruction.to_string()),
            MockMode::Error(err) => Err(err.clone()),
        }
    }

    fn provider_name(&self) -> &str {
        "Mock Provider"
    }
}
