use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the API base URL
pub const API_URL_ENV: &str = "MEDTRACK_API_URL";

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the remote users API (e.g., "https://api.example.com")
    pub api_base_url: ConfigValue<Option<String>>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    api_base_url: Option<String>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let env_url = std::env::var(API_URL_ENV).ok();
        Self::load_with_env(config_path, env_url)
    }

    fn load_with_env(
        config_path: Option<PathBuf>,
        env_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut api_base_url = ConfigValue::new(None, ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.api_base_url {
                api_base_url = ConfigValue::new(Some(url), ConfigSource::File);
            }
        }

        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            api_base_url = ConfigValue::new(Some(url), ConfigSource::Environment);
        }

        Ok(Self {
            api_base_url,
            config_file,
        })
    }

    /// Returns the API base URL, or an error explaining how to set one.
    pub fn require_api_base_url(&self) -> Result<&str, ConfigError> {
        self.api_base_url
            .value
            .as_deref()
            .ok_or(ConfigError::NotConfigured)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/medtrack/
    /// - macOS: ~/Library/Application Support/medtrack/
    /// - Windows: %APPDATA%/medtrack/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("medtrack")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    NotConfigured,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::NotConfigured => write!(
                f,
                "API not configured. Set api_base_url in the config file or {}.",
                API_URL_ENV
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load_with_env(Some(config_path), None).unwrap();
        assert!(config.api_base_url.value.is_none());
        assert_eq!(config.api_base_url.source, ConfigSource::Default);
        assert!(config.config_file.is_none());
        assert!(matches!(
            config.require_api_base_url(),
            Err(ConfigError::NotConfigured)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_base_url: https://api.example.com").unwrap();

        let config = Config::load_with_env(Some(config_path.clone()), None).unwrap();
        assert_eq!(
            config.api_base_url.value.as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(config.api_base_url.source, ConfigSource::File);
        assert_eq!(config.config_file, Some(config_path));
        assert_eq!(
            config.require_api_base_url().unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_base_url: https://from-file.example.com").unwrap();

        let config = Config::load_with_env(
            Some(config_path),
            Some("http://localhost:5000".to_string()),
        )
        .unwrap();
        assert_eq!(
            config.api_base_url.value.as_deref(),
            Some("http://localhost:5000")
        );
        assert_eq!(config.api_base_url.source, ConfigSource::Environment);
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load_with_env(Some(config_path), Some("  ".to_string())).unwrap();
        assert_eq!(config.api_base_url.source, ConfigSource::Default);
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load_with_env(Some(config_path), None);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
