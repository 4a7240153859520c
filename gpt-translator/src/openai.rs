//! OpenAI-compatible chat-completion provider
//!
//! Sends one `POST {base_url}/chat/completions` per call with a fixed model
//! and temperature, then pulls the first choice's message content out of the
//! reply.
//!
//! # Authentication
//!
//! The bearer key comes from [`ClientConfig::api_key`], normally loaded from
//! `OPENAI_API_KEY` by a server-side process. It is never serialized into
//! anything handed to a browser.

use crate::config::{ClientConfig, MODEL, TEMPERATURE};
use crate::error::{TranslateError, TranslateResult};
use crate::provider::{CompletionProvider, MAX_INSTRUCTION_CHARS, normalize_reply};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion client for OpenAI and API-compatible endpoints
#[derive(Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: ClientConfig,
}

impl OpenAiProvider {
    /// Build a provider with its own pooled HTTP client
    pub fn new(config: ClientConfig) -> TranslateResult<Self> {
        reqwest::Url::parse(&config.completions_url())
            .map_err(|e| TranslateError::Config(format!("Invalid base URL {}: {}", config.base_url, e)))?;

        if config.api_key.is_none() {
            tracing::warn!(
                base_url = %config.base_url,
                "no API key configured; requests are sent without Authorization"
            );
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TranslateError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build a provider from `OPENAI_*` environment variables
    pub fn from_env() -> TranslateResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn extract_reply(body: &[u8]) -> TranslateResult<String> {
        let response: ChatCompletionResponse = serde_json::from_slice(body)?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref());

        Ok(normalize_reply(content))
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, instruction: &str) -> TranslateResult<String> {
        if instruction.chars().count() > MAX_INSTRUCTION_CHARS {
            return Err(TranslateError::Validation(format!(
                "Text exceeds maximum length of {} characters",
                MAX_INSTRUCTION_CHARS
            )));
        }

        let body = ChatCompletionRequest {
            model: MODEL,
            messages: [ChatMessage {
                role: "user",
                content: instruction,
            }],
            temperature: TEMPERATURE,
        };

        let mut request = self
            .client
            .post(self.config.completions_url())
            .header(CONTENT_TYPE, "application/json")
            .json(&body);

        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranslateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Self::extract_reply(&bytes)
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}
