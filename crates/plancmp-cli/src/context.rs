//! Wiring of configuration, storage and the inference client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use plancmp_application::ComparisonUseCase;
use plancmp_core::config::AppConfig;
use plancmp_core::document::DocumentRepository;
use plancmp_core::secret::SecretService;
use plancmp_infrastructure::{ConfigStorage, FsDocumentRepository, PlanComparePaths, SecretServiceImpl};
use plancmp_interaction::Ai21ApiClient;

/// Everything a command needs, loaded once per process.
pub struct AppContext {
    pub config: AppConfig,
    documents: Arc<FsDocumentRepository>,
}

impl AppContext {
    /// Loads `config.toml` and applies command-line overrides.
    pub fn load(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => PlanComparePaths::config_file()?,
        };
        let storage = ConfigStorage::new(config_path);
        let mut config = storage
            .load()
            .with_context(|| format!("Failed to load {}", storage.path().display()))?;

        if let Some(data_dir) = data_dir {
            config.documents.data_dir = data_dir;
        }
        tracing::debug!(
            data_dir = %config.documents.data_dir.display(),
            endpoint = %config.inference.endpoint,
            "Configuration loaded"
        );

        let documents = Arc::new(FsDocumentRepository::new(config.documents.data_dir.clone()));
        Ok(Self { config, documents })
    }

    pub fn documents(&self) -> &FsDocumentRepository {
        &self.documents
    }

    /// Resolves the credential and builds the use case.
    ///
    /// When no key is configured, a template `secret.json` is written so the
    /// user has somewhere to put one.
    pub async fn comparison(&self) -> Result<ComparisonUseCase> {
        let secrets = SecretServiceImpl::from_env()?;
        let api_key = match secrets.ai21_api_key().await {
            Ok(key) => key,
            Err(err) => {
                let hint = match PlanComparePaths::ensure_secret_file() {
                    Ok(path) => format!("add your key to {} or set AI21_API_KEY", path.display()),
                    Err(_) => "set AI21_API_KEY".to_string(),
                };
                return Err(anyhow::Error::new(err).context(format!("No AI21 credential: {hint}")));
            }
        };

        let mut client = Ai21ApiClient::new(api_key, self.config.inference.clone())?;
        let model_override = secrets
            .load_secrets()
            .await?
            .ai21
            .and_then(|ai21| ai21.model_name)
            .filter(|model| !model.trim().is_empty());
        if let Some(model) = model_override {
            client = client.with_model(model);
        }

        let documents: Arc<dyn DocumentRepository> = self.documents.clone();
        Ok(ComparisonUseCase::new(
            documents,
            Arc::new(client),
            self.config.documents.max_selected,
        ))
    }
}
