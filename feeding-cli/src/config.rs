use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

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
    /// API root the feeding events resource hangs off
    pub api_url: ConfigValue<String>,
    /// Bearer token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<ConfigValue<String>>,
    /// Farm used when `--farm` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_id: Option<ConfigValue<i64>>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    api_url: Option<String>,
    api_token: Option<String>,
    farm_id: Option<i64>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut api_url = ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default);
        let mut api_token = None;
        let mut farm_id = None;
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.api_url {
                api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(token) = file_config.api_token {
                api_token = Some(ConfigValue::new(token, ConfigSource::File));
            }
            if let Some(farm) = file_config.farm_id {
                farm_id = Some(ConfigValue::new(farm, ConfigSource::File));
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("FEEDING_API_URL") {
            api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(token) = std::env::var("FEEDING_API_TOKEN") {
            api_token = Some(ConfigValue::new(token, ConfigSource::Environment));
        }
        if let Ok(farm) = std::env::var("FEEDING_FARM_ID") {
            let farm = farm
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FEEDING_FARM_ID".to_string(), farm))?;
            farm_id = Some(ConfigValue::new(farm, ConfigSource::Environment));
        }

        Ok(Self {
            api_url,
            api_token,
            farm_id,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/feeding/
    /// - macOS: ~/Library/Application Support/feeding/
    /// - Windows: %APPDATA%/feeding/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("feeding")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }

    /// The active farm: the command line wins over configuration.
    pub fn active_farm(&self, cli_farm: Option<i64>) -> Option<i64> {
        cli_farm.or_else(|| self.farm_id.as_ref().map(|f| f.value))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(String, String),
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
            ConfigError::InvalidValue(name, value) => {
                write!(f, "Invalid value for {}: '{}'", name, value)
            }
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

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_url.value, DEFAULT_API_URL);
        assert_eq!(config.api_url.source, ConfigSource::Default);
        assert!(config.api_token.is_none());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_url: https://ganado.example.com/api").unwrap();
        writeln!(file, "api_token: abc123").unwrap();
        writeln!(file, "farm_id: 7").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.api_url.value, "https://ganado.example.com/api");
        assert_eq!(config.api_url.source, ConfigSource::File);
        assert_eq!(config.api_token.unwrap().value, "abc123");
        assert_eq!(config.farm_id.as_ref().unwrap().value, 7);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "farm_id: 7").unwrap();

        std::env::set_var("FEEDING_FARM_ID", "12");

        let config = Config::load(Some(config_path)).unwrap();
        let farm = config.farm_id.unwrap();
        assert_eq!(farm.value, 12);
        assert_eq!(farm.source, ConfigSource::Environment);

        std::env::remove_var("FEEDING_FARM_ID");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_cli_farm_wins_over_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "farm_id: 7").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.active_farm(None), Some(7));
        assert_eq!(config.active_farm(Some(3)), Some(3));
    }

    #[test]
    fn test_no_farm_anywhere() {
        let temp_dir = tempdir().unwrap();
        let config = Config::load(Some(temp_dir.path().join("missing.yaml"))).unwrap();
        assert_eq!(config.active_farm(None), None);
    }
}
