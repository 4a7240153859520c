//! Client configuration
//!
//! The completion endpoint and credential are passed into the provider as an
//! explicit [`ClientConfig`]; nothing is held in globals. Model and sampling
//! temperature are fixed.

use crate::error::{TranslateError, TranslateResult};
use std::env;
use std::time::Duration;

/// Model identifier sent with every request
pub const MODEL: &str = "gpt-4o-mini";

/// Low temperature favours a stable translation over creative variation
pub const TEMPERATURE: f32 = 0.3;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the completion endpoint
#[derive(Clone)]
pub struct ClientConfig {
    /// API root; `/chat/completions` is appended
    pub base_url: String,
    /// Bearer credential. `None` when an upstream proxy attaches it.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = if api_key.trim().is_empty() {
            None
        } else {
            Some(api_key)
        };
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `OPENAI_BASE_URL`, `OPENAI_API_KEY` and `OPENAI_TIMEOUT_SECS`
    ///
    /// A missing key is not an error here; the provider logs a warning since
    /// some deployments put an authenticating proxy in front of the API.
    pub fn from_env() -> TranslateResult<Self> {
        let base_url = env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match env::var("OPENAI_TIMEOUT_SECS") {
            Ok(value) => value.trim().parse::<u64>().map_err(|_| {
                TranslateError::Config(format!("OPENAI_TIMEOUT_SECS is not a number: {}", value))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self::new(base_url).with_timeout(Duration::from_secs(timeout_secs));

        Ok(match env::var("OPENAI_API_KEY") {
            Ok(key) => config.with_api_key(key),
            Err(_) => config,
        })
    }

    /// Full URL of the chat-completion endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
