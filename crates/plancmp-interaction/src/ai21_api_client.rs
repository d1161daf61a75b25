//! Ai21ApiClient - direct REST implementation for the AI21 Studio chat
//! completions API.
//!
//! The credential and endpoint are handed in by the caller; this client never
//! reads configuration or environment on its own.

use plancmp_core::config::InferenceConfig;
use plancmp_core::inference::{InferenceClient, InferenceError};
use plancmp_core::prompt::Prompt;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde_json::Value;

/// Inference client that talks to the AI21 HTTP API.
#[derive(Clone)]
pub struct Ai21ApiClient {
    client: Client,
    api_key: String,
    config: InferenceConfig,
}

impl std::fmt::Debug for Ai21ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ai21ApiClient")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl Ai21ApiClient {
    /// Creates a client for the given credential and generation settings.
    ///
    /// Fails if the key cannot be carried in an HTTP header.
    pub fn new(api_key: impl Into<String>, config: InferenceConfig) -> Result<Self, InferenceError> {
        let api_key = api_key.into();
        HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
            InferenceError::Configuration("API key contains characters not allowed in a header".into())
        })?;

        Ok(Self {
            client: Client::new(),
            api_key,
            config,
        })
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    fn build_request<'a>(&'a self, prompt: &'a Prompt) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.as_str(),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
        }
    }

    async fn send_request(&self, body: &ChatCompletionRequest<'_>) -> Result<Value, InferenceError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| InferenceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| InferenceError::Transport(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| InferenceError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl InferenceClient for Ai21ApiClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, prompt: &Prompt) -> Result<Value, InferenceError> {
        let request = self.build_request(prompt);
        tracing::info!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            prompt_chars = prompt.as_str().len(),
            "Sending completion request"
        );

        let result = self.send_request(&request).await;
        match &result {
            Ok(_) => tracing::debug!("Completion request succeeded"),
            Err(err) => tracing::debug!(error = %err, "Completion request failed"),
        }
        result
    }
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}
