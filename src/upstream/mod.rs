//! DeepSeek chat-completions client.
//!
//! A thin reqwest wrapper around a DeepSeek-compatible
//! `/v1/chat/completions` endpoint. One request per analysis run; every
//! failure mode is reported as an [`UpstreamError`] and left for the
//! orchestrator to absorb.

use crate::analysis::prompt::SYSTEM_PROMPT;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Failure modes of a single upstream call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("cannot connect to model endpoint at {0}")]
    Connect(String),

    #[error("model endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("model returned an empty completion")]
    Empty,

    #[error("failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to parse model response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Capability to ask the upstream model for a completion.
///
/// The orchestrator only depends on this trait, so analysis logic can be
/// exercised with stub clients and no live endpoint.
#[allow(async_fn_in_trait)]
pub trait ModelClient {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Configuration for the DeepSeek client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://deepseek:8080/v1/chat/completions".to_string(),
            api_key: None,
            model_name: "deepseek-chat".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout_seconds: 120,
        }
    }
}

/// Chat message in the completions request and response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completions API request.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// Chat completions API response.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Client for a DeepSeek-compatible chat-completions endpoint.
pub struct DeepSeekClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl DeepSeekClient {
    /// Create a new client with a per-request timeout.
    pub fn new(config: ClientConfig) -> Self {
        info!(
            "Initializing model client for {} at {}",
            config.model_name, config.api_url
        );

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }
}

impl ModelClient for DeepSeekClient {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        let request = ChatRequest {
            model: &self.config.model_name,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!("Sending completion request to {}", self.config.api_url);

        let mut builder = self.http_client.post(&self.config.api_url).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(self.config.timeout_seconds)
            } else if e.is_connect() {
                UpstreamError::Connect(self.config.api_url.clone())
            } else {
                UpstreamError::Transport(e)
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let chat_response: ChatResponse =
            response.json().await.map_err(UpstreamError::Decode)?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(UpstreamError::Empty);
        }

        Ok(content)
    }
}
