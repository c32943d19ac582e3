//! Chat-completion API client (Perplexity/OpenAI wire format)
//!
//! `POST {base_url}/chat/completions` with bearer auth. The first choice's
//! `message.content` is returned verbatim.

use async_trait::async_trait;
use ivf_common::config::OracleConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ClaimOracle, OracleError, OraclePrompt};

const USER_AGENT: &str = concat!("influencer-verifier/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

/// Chat-completion API client
pub struct ChatCompletionClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatCompletionClient {
    pub fn new(api_key: String, config: &OracleConfig) -> Result<Self, OracleError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OracleError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ClaimOracle for ChatCompletionClient {
    async fn complete(&self, prompt: &OraclePrompt) -> Result<String, OracleError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(model = %self.model, "Querying chat-completion API");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| OracleError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(OracleError::InvalidApiKey);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OracleError::ApiError(status.as_u16(), error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::ParseError(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(OracleError::EmptyResponse)?;

        tracing::debug!(
            status = status.as_u16(),
            content_len = content.len(),
            "Chat-completion response received"
        );

        Ok(content)
    }
}
