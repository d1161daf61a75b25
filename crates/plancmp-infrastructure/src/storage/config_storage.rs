//! `config.toml` storage.

use plancmp_core::config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during config storage operations.
#[derive(Debug)]
pub enum ConfigStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parsing error.
    TomlParseError(toml::de::Error),
}

impl std::fmt::Display for ConfigStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigStorageError::TomlParseError(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigStorageError {}

impl From<std::io::Error> for ConfigStorageError {
    fn from(e: std::io::Error) -> Self {
        ConfigStorageError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigStorageError {
    fn from(e: toml::de::Error) -> Self {
        ConfigStorageError::TomlParseError(e)
    }
}

/// Read-only handle on a `config.toml` file.
///
/// A missing or blank file is not an error: it loads as
/// `AppConfig::default()`. Unknown keys are ignored.
#[derive(Debug, Clone)]
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AppConfig, ConfigStorageError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_missing_and_blank_files_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        assert_eq!(ConfigStorage::new(path.clone()).load().unwrap(), AppConfig::default());

        fs::write(&path, "  \n").unwrap();
        assert_eq!(ConfigStorage::new(path).load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[documents]
data_dir = "/srv/plans"

[inference]
model = "jamba-1.5-mini"
max_tokens = 512
"#,
        )
        .unwrap();

        let config = ConfigStorage::new(path).load().unwrap();
        assert_eq!(config.documents.data_dir, PathBuf::from("/srv/plans"));
        assert_eq!(config.documents.max_selected, 2);
        assert_eq!(config.inference.model, "jamba-1.5-mini");
        assert_eq!(config.inference.max_tokens, 512);
        assert_eq!(config.inference.temperature, 0.4);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[inference\nmodel = ").unwrap();

        let result = ConfigStorage::new(path).load();
        assert!(matches!(result, Err(ConfigStorageError::TomlParseError(_))));
    }
}
