//! Claim oracle: the external chat-completion service
//!
//! The engine only sees the [`ClaimOracle`] trait. Production uses
//! [`ChatCompletionClient`]; tests plug in scripted implementations.

pub mod client;
pub mod prompts;
pub mod schema;

pub use client::ChatCompletionClient;
pub use schema::SchemaError;

use async_trait::async_trait;
use thiserror::Error;

/// Oracle transport errors
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    /// The first choice carried no message content
    #[error("Completion response had no content")]
    EmptyResponse,
}

impl From<OracleError> for ivf_common::Error {
    fn from(err: OracleError) -> Self {
        ivf_common::Error::Upstream(err.to_string())
    }
}

/// A chat-style request: one system instruction, one user instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OraclePrompt {
    pub system: String,
    pub user: String,
}

/// External text-completion service
///
/// Returns the raw text of the completion. Interpreting it (as JSON) is the
/// caller's job, see [`schema`].
#[async_trait]
pub trait ClaimOracle: Send + Sync {
    async fn complete(&self, prompt: &OraclePrompt) -> Result<String, OracleError>;
}
