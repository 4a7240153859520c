//! Text translation through a chat-completion model
//!
//! The crate covers one request/response cycle: pick languages, build an
//! instruction, send it to an OpenAI-compatible endpoint, and track the
//! result in a session.
//!
//! # Workflow Example
//!
//! ```ignore
//! use gpt_translator::{ClientConfig, OpenAiProvider, TranslatorSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Provider holds the endpoint and credential
//!     let provider = OpenAiProvider::new(ClientConfig::from_env()?)?;
//!
//!     // 2. Session holds what the user selected and typed
//!     let mut session = TranslatorSession::new();
//!     session.set_target("fr")?;
//!     session.set_input("Hello");
//!
//!     // 3. One exchange, then read the result
//!     session.translate(&provider).await?;
//!     println!("{}", session.display_text());
//!     Ok(())
//! }
//! ```

pub mod clipboard;
pub mod config;
pub mod error;
pub mod language;
pub mod mock;
pub mod openai;
pub mod prompt;
pub mod provider;
pub mod request;
pub mod session;
pub mod speech;

// Re-export main types for convenient access
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
pub use config::ClientConfig;
pub use error::{TranslateError, TranslateResult};
pub use language::{AUTO, LANGUAGES, Language};
pub use mock::{MockMode, MockProvider};
pub use openai::OpenAiProvider;
pub use prompt::build_instruction;
pub use provider::{CompletionProvider, NO_TRANSLATION};
pub use request::TranslationRequest;
pub use session::{FAILURE_MESSAGE, SessionError, Submission, TranslationState, TranslatorSession};
pub use speech::{CaptureError, NoSpeechCapture, SpeechCapture};
