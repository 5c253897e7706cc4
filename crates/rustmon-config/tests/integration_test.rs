//! Integration tests for rustmon-config crate.

use rustmon_common::test_utils::{config_fixtures, create_temp_dir};
use rustmon_config::{Config, ConfigLoader, ProviderKind};

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();

    // Default config should fail validation due to the empty token
    assert!(config.validate().is_err());

    config.discord.token = "test_token".to_string();
    // Still missing the endpoint of the default provider
    assert!(config.validate().is_err());

    config.provider.battlemetrics_url = "https://api.battlemetrics.com/servers/1".to_string();
    assert!(config.validate().is_ok());
}

#[tokio::test]
async fn test_load_yaml_file() {
    let dir = create_temp_dir();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, config_fixtures::full_config_yaml()).unwrap();

    let config = ConfigLoader::new(&path).load().await.unwrap();
    assert_eq!(config.provider.use_api, ProviderKind::RustServers);
    assert_eq!(config.polling.update_interval_minutes, 2);
    assert!(config.validate().is_ok());
}

#[tokio::test]
async fn test_missing_file_yields_defaults() {
    let dir = create_temp_dir();
    let loader = ConfigLoader::new(dir.path().join("absent.json"));

    let config = loader.load().await.unwrap();
    assert_eq!(config.game_server.port, 28015);
}

#[tokio::test]
async fn test_malformed_file_is_an_error() {
    let dir = create_temp_dir();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[discord\ntoken = ").unwrap();

    assert!(ConfigLoader::new(&path).load().await.is_err());
}
