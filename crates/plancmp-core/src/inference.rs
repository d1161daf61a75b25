//! Inference client interface.
//!
//! One call sends one prompt as the sole user message and returns the decoded
//! response body untouched. Interpreting that body is the job of
//! [`crate::response::normalize`].

use crate::prompt::Prompt;
use serde_json::Value;
use thiserror::Error;

/// Why a completion request produced no usable response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// The request never got an HTTP response (DNS, connect, TLS, reset).
    #[error("request to inference API failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("inference API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not JSON.
    #[error("failed to decode inference API response: {0}")]
    Decode(String),

    /// The client could not be set up (bad credential, bad endpoint).
    #[error("inference client misconfigured: {0}")]
    Configuration(String),
}

/// Sends a prompt to a hosted completion model.
#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Issues exactly one request. No retries.
    async fn complete(&self, prompt: &Prompt) -> Result<Value, InferenceError>;
}
