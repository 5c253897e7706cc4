//! Default values for every configuration section.

use crate::schema::*;

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            polling: PollingConfig::default(),
            provider: ProviderSettings::default(),
            game_server: GameServerConfig::default(),
            wipe: WipeConfig::default(),
            donation: DonationConfig::default(),
            messages: MessagesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            update_interval_minutes: 5,
            request_timeout_seconds: 10,
            publish_timeout_seconds: 10,
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            use_api: ProviderKind::BattleMetrics,
            battlemetrics_url: String::new(),
            rust_servers_url: String::new(),
        }
    }
}

impl Default for GameServerConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 28015,
        }
    }
}

impl Default for WipeConfig {
    fn default() -> Self {
        Self {
            timezone: "Europe/Berlin".to_string(),
            time: "20:00".to_string(),
        }
    }
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            url: "https://donate.aerography.eu/".to_string(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            languages: vec!["de-DE".to_string(), "en-US".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            json: false,
        }
    }
}
