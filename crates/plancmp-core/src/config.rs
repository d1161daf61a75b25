//! Configuration models.
//!
//! `AppConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Every field has a default so a partial or missing file is always usable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_MAX_SELECTED: usize = 2;

pub const DEFAULT_ENDPOINT: &str = "https://api.ai21.com/studio/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "jamba-1.5-large";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TEMPERATURE: f32 = 0.4;
pub const DEFAULT_TOP_P: f32 = 1.0;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
}

/// Where plan documents live and how many may be compared at once.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DocumentsConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_max_selected")]
    pub max_selected: usize,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_selected: DEFAULT_MAX_SELECTED,
        }
    }
}

/// Fixed generation parameters sent with every completion request.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_max_selected() -> usize {
    DEFAULT_MAX_SELECTED
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_top_p() -> f32 {
    DEFAULT_TOP_P
}

/// Root of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    /// AI21 Studio API configuration
    #[serde(default)]
    pub ai21: Option<Ai21Config>,
}

/// AI21 Studio API configuration
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Ai21Config {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}
