use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Config file {} not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("Home directory not found")]
    HomeNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),

    #[error("API key not found. Set {0} in the environment or a .env file")]
    MissingApiKey(String),

    #[error("Failed to load .env file: {0}")]
    EnvFile(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub translation: TranslationConfig,
    pub io: IoConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TranslationConfig {
    pub api_key_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub column_suffix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct IoConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub column: String,
    pub overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Config::default_config().translation
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Config::default_config().io
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".config").join("scopus-translate"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        // Validate config
        config.validate()?;

        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Load the explicit file if given, otherwise the default file if it exists,
    /// otherwise built-in defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::config_path() {
            Ok(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default_config()),
        }
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Config {
            translation: TranslationConfig {
                api_key_env: "DEEPL_API_KEY".to_string(),
                api_key: None,
                column_suffix: "和訳".to_string(),
                api_url: None,
            },
            io: IoConfig {
                input_path: None,
                output_path: None,
                column: "抄録".to_string(),
                overwrite: false,
            },
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.translation.api_key_env.is_empty() {
            return Err(ConfigError::InvalidValue(
                "api_key_env must not be empty".to_string(),
            ));
        }

        if self.translation.column_suffix.is_empty() {
            return Err(ConfigError::InvalidValue(
                "column_suffix must not be empty".to_string(),
            ));
        }

        if let Some(url) = &self.translation.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue(format!(
                    "api_url must be an http(s) URL: {}",
                    url
                )));
            }
        }

        if self.io.column.is_empty() {
            return Err(ConfigError::InvalidValue(
                "column must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Get API key from environment variable or config
    pub fn get_api_key(&self) -> Option<String> {
        // First try environment variable
        if let Ok(key) = std::env::var(&self.translation.api_key_env) {
            if !key.is_empty() {
                return Some(key);
            }
        }

        // Fall back to config file if present
        self.translation.api_key.clone().filter(|key| !key.is_empty())
    }
}

/// Home directory from `HOME`, or `USERPROFILE` on Windows
pub fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .iter()
        .filter_map(|var| std::env::var_os(var))
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Load `.env` from the working directory (or a parent) into the process
/// environment. A missing file is fine; a malformed one is an error.
pub fn load_env_file() -> Result<Option<PathBuf>, ConfigError> {
    env_file_result(dotenvy::dotenv())
}

fn env_file_result<T>(result: Result<T, dotenvy::Error>) -> Result<Option<T>, ConfigError> {
    match result {
        Ok(loaded) => Ok(Some(loaded)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(ConfigError::EnvFile(e.to_string())),
    }
}
