//! Secret service implementation.
//!
//! Credential priority: `secret.json` > `AI21_API_KEY` environment variable.

use crate::storage::{SecretStorage, SecretStorageError};
use plancmp_core::config::SecretConfig;
use plancmp_core::error::{PlanCompareError, Result};
use plancmp_core::secret::SecretService;
use std::sync::{Arc, RwLock};

pub const API_KEY_ENV_VAR: &str = "AI21_API_KEY";

/// Loads secrets from `secret.json`, caching the first successful read.
#[derive(Clone)]
pub struct SecretServiceImpl {
    storage: SecretStorage,
    /// Key taken from the environment when the file has none.
    env_api_key: Option<String>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Uses the default `secret.json` location and the `AI21_API_KEY` variable.
    pub fn from_env() -> Result<Self> {
        let storage = SecretStorage::new()
            .map_err(|e| PlanCompareError::config(format!("Failed to locate secret file: {e}")))?;
        let env_api_key = std::env::var(API_KEY_ENV_VAR).ok();
        Ok(Self::new(storage, env_api_key))
    }

    pub fn new(storage: SecretStorage, env_api_key: Option<String>) -> Self {
        Self {
            storage,
            env_api_key,
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig> {
        {
            let read_lock = self
                .secrets
                .read()
                .map_err(|_| PlanCompareError::internal("secret cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = match self.storage.load() {
            Ok(config) => config,
            // A missing file just means the environment has to supply the key.
            Err(SecretStorageError::NotFound(path)) => {
                tracing::debug!(path = %path.display(), "No secret file");
                SecretConfig::default()
            }
            Err(e) => {
                return Err(PlanCompareError::security(format!(
                    "Failed to load {}: {}",
                    self.storage.path().display(),
                    e
                )));
            }
        };

        let mut write_lock = self
            .secrets
            .write()
            .map_err(|_| PlanCompareError::internal("secret cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_secrets_internal()
    }

    async fn ai21_api_key(&self) -> Result<String> {
        let from_file = self
            .load_secrets_internal()?
            .ai21
            .map(|config| config.api_key)
            .filter(|key| !key.trim().is_empty());

        if let Some(key) = from_file {
            return Ok(key);
        }

        self.env_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PlanCompareError::security(format!(
                    "AI21 API key not found in {} or the {} environment variable",
                    self.storage.path().display(),
                    API_KEY_ENV_VAR
                ))
            })
    }
}
