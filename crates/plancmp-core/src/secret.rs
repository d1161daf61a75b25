//! Secret management service trait.
//!
//! Defines the interface for loading the inference API credential.

use crate::config::SecretConfig;
use crate::error::Result;

/// Service for loading secret configuration.
///
/// Implementations must never log secret values or put them into error
/// messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Returns the AI21 API key, or a `Security` error when none is configured.
    async fn ai21_api_key(&self) -> Result<String>;
}
