//! Unified path management for plan-compare configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/plancmp/           # Config directory (platform config dir)
//! ├── config.toml              # Application configuration
//! ├── secret.json              # API keys
//! └── logs/                    # Application logs
//!     └── plancmp.log.YYYY-MM-DD
//! ```

use plancmp_core::config::{Ai21Config, SecretConfig};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "plancmp";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for plan-compare.
pub struct PlanComparePaths;

impl PlanComparePaths {
    /// Returns the plan-compare configuration directory (e.g. `~/.config/plancmp/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }

    /// Ensures the secret file exists, creating it with a template if it doesn't.
    ///
    /// # Security Note
    ///
    /// Sets file permissions to 600 (user read/write only) on Unix systems.
    pub fn ensure_secret_file() -> Result<PathBuf, std::io::Error> {
        let secret_path = Self::secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;
        write_secret_template(&secret_path)?;
        Ok(secret_path)
    }
}

/// Writes an empty credential template to `path` unless a file is already there.
pub(crate) fn write_secret_template(path: &std::path::Path) -> Result<(), std::io::Error> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let template_config = SecretConfig {
        ai21: Some(Ai21Config {
            api_key: String::new(),
            model_name: None,
        }),
    };

    let template_json = serde_json::to_string_pretty(&template_config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(path, template_json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_files_live_under_config_dir() {
        let Ok(config_dir) = PlanComparePaths::config_dir() else {
            // No config dir on this platform (e.g. HOME unset in CI).
            return;
        };
        assert!(config_dir.ends_with("plancmp"));
        assert!(PlanComparePaths::config_file().unwrap().starts_with(&config_dir));
        assert!(PlanComparePaths::secret_file().unwrap().ends_with("secret.json"));
        assert!(PlanComparePaths::logs_dir().unwrap().ends_with("logs"));
    }

    #[test]
    fn test_secret_template_written_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("secret.json");

        write_secret_template(&path).unwrap();
        let written: SecretConfig =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.ai21.unwrap().api_key, "");

        std::fs::write(&path, r#"{"ai21":{"api_key":"kept"}}"#).unwrap();
        write_secret_template(&path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("kept"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let fresh = temp_dir.path().join("fresh.json");
            write_secret_template(&fresh).unwrap();
            let mode = std::fs::metadata(&fresh).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
