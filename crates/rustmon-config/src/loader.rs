//! Configuration loading from JSON, YAML or TOML files with environment overrides.

use crate::schema::{Config, ProviderKind};
use rustmon_common::{Result, RustmonError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "RUSTMON_CONFIG";

/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON, the default.
    Json,
    /// YAML.
    Yaml,
    /// TOML.
    Toml,
}

impl ConfigFormat {
    /// Picks a format from the file extension, falling back to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Configuration loader.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a loader for the path named by `RUSTMON_CONFIG`, or `config.json`.
    pub fn from_env() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::new(path)
    }

    /// The file this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads configuration from file and applies environment overrides.
    ///
    /// A missing file yields the defaults so the bot can be configured
    /// entirely through the environment.
    pub async fn load(&self) -> Result<Config> {
        let config = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                info!(path = %self.path.display(), "Loading configuration");
                Self::parse(&content, ConfigFormat::from_path(&self.path))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Configuration file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(e.into()),
        };

        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    /// Parses configuration text in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Config> {
        match format {
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| RustmonError::Serialization(format!("invalid JSON config: {e}"))),
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| RustmonError::Serialization(format!("invalid YAML config: {e}"))),
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| RustmonError::Serialization(format!("invalid TOML config: {e}"))),
        }
    }

    /// Applies `DISCORD_TOKEN` and `RUSTMON_PROVIDER` on top of a parsed config.
    pub fn apply_overrides<F>(mut config: Config, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN").filter(|t| !t.is_empty()) {
            debug!("Discord token taken from environment");
            config.discord.token = token;
        }

        if let Some(provider) = lookup("RUSTMON_PROVIDER") {
            config.provider.use_api = provider.parse::<ProviderKind>()?;
            debug!(provider = %config.provider.use_api, "Provider taken from environment");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustmon_common::test_utils::config_fixtures;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/config.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("config.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("config.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Json);
    }

    #[test]
    fn test_parse_minimal_json_fills_defaults() {
        let config =
            ConfigLoader::parse(config_fixtures::minimal_config_json(), ConfigFormat::Json)
                .unwrap();
        assert_eq!(config.discord.token, "test_token");
        assert_eq!(config.provider.use_api, ProviderKind::BattleMetrics);
        assert_eq!(config.polling.update_interval_minutes, 5);
        assert_eq!(config.messages.languages, vec!["de-DE", "en-US"]);
    }

    #[test]
    fn test_parse_yaml_and_toml() {
        let yaml =
            ConfigLoader::parse(config_fixtures::full_config_yaml(), ConfigFormat::Yaml).unwrap();
        assert_eq!(yaml.provider.use_api, ProviderKind::RustServers);
        assert_eq!(yaml.game_server.port, 28016);
        assert_eq!(yaml.wipe.time, "19:00");

        let toml =
            ConfigLoader::parse(config_fixtures::full_config_toml(), ConfigFormat::Toml).unwrap();
        assert_eq!(toml.discord.token, "test_token_toml");
        assert_eq!(toml.polling.update_interval_minutes, 10);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ConfigLoader::parse("{ not json", ConfigFormat::Json).is_err());
    }

    #[test]
    fn test_environment_overrides() {
        let config = ConfigLoader::apply_overrides(Config::default(), |key| match key {
            "DISCORD_TOKEN" => Some("env_token".to_string()),
            "RUSTMON_PROVIDER" => Some("2".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.discord.token, "env_token");
        assert_eq!(config.provider.use_api, ProviderKind::RustServers);
    }

    #[test]
    fn test_unknown_provider_override_fails() {
        let result = ConfigLoader::apply_overrides(Config::default(), |key| {
            (key == "RUSTMON_PROVIDER").then(|| "nope".to_string())
        });
        assert!(result.is_err());
    }
}
