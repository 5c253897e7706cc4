//! Configuration schema definitions using serde.

use chrono::NaiveTime;
use chrono_tz::Tz;
use rustmon_common::{Result, RustmonError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure for Rustmon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Status polling configuration.
    pub polling: PollingConfig,
    /// Upstream status provider configuration.
    pub provider: ProviderSettings,
    /// Monitored game server.
    pub game_server: GameServerConfig,
    /// Wipe schedule configuration.
    pub wipe: WipeConfig,
    /// Donation command configuration.
    pub donation: DonationConfig,
    /// Reply language configuration.
    pub messages: MessagesConfig,
    /// Log output configuration.
    pub logging: LoggingConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
}

/// Status polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Minutes to wait after one publish before the next fetch.
    pub update_interval_minutes: u64,
    /// Upper bound for a single upstream request.
    pub request_timeout_seconds: u64,
    /// Upper bound for a single presence update.
    pub publish_timeout_seconds: u64,
}

impl PollingConfig {
    /// The delay between the end of one cycle and the start of the next.
    pub const fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_minutes.saturating_mul(60))
    }

    /// Timeout applied to upstream HTTP requests.
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Timeout applied to presence updates.
    pub const fn publish_timeout(&self) -> Duration {
        Duration::from_secs(self.publish_timeout_seconds)
    }
}

/// The supported upstream status APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// BattleMetrics server API.
    #[serde(rename = "battlemetrics", alias = "1")]
    BattleMetrics,
    /// rust-servers.net detail API.
    #[serde(rename = "rust_servers", alias = "rust-servers", alias = "2")]
    RustServers,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BattleMetrics => f.write_str("battlemetrics"),
            Self::RustServers => f.write_str("rust_servers"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = RustmonError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "battlemetrics" => Ok(Self::BattleMetrics),
            "2" | "rust_servers" | "rust-servers" => Ok(Self::RustServers),
            other => Err(RustmonError::config(format!("unknown provider '{other}'"))),
        }
    }
}

/// Upstream provider selection and endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Which provider is active for this process.
    pub use_api: ProviderKind,
    /// BattleMetrics server URL.
    pub battlemetrics_url: String,
    /// rust-servers.net detail URL.
    pub rust_servers_url: String,
}

/// The provider selected at startup together with its endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Active provider.
    pub provider_id: ProviderKind,
    /// Endpoint queried on every poll.
    pub endpoint_url: String,
}

/// Monitored game server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameServerConfig {
    /// Public address of the game server.
    pub ip: String,
    /// Game port.
    pub port: u16,
}

/// Wipe schedule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WipeConfig {
    /// IANA timezone used to decide what "today" is.
    pub timezone: String,
    /// Announced wipe time of day in `HH:MM`.
    pub time: String,
}

impl WipeConfig {
    /// Parses the configured timezone.
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| RustmonError::config(format!("invalid wipe timezone: {e}")))
    }

    /// Parses the configured wipe time.
    pub fn time_of_day(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.time, "%H:%M").map_err(|e| {
            RustmonError::config(format!("invalid wipe time '{}': {e}", self.time))
        })
    }
}

/// Donation command configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DonationConfig {
    /// Donation link.
    pub url: String,
}

/// Reply language configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Languages included in multi-language replies, in order.
    pub languages: Vec<String>,
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for daily rolling log files, stdout only when unset.
    pub directory: Option<PathBuf>,
    /// Emit JSON lines instead of human readable output.
    pub json: bool,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        crate::validator::ConfigValidator::validate(self)
    }

    /// Returns the active provider and its endpoint.
    pub fn provider_config(&self) -> ProviderConfig {
        let endpoint_url = match self.provider.use_api {
            ProviderKind::BattleMetrics => self.provider.battlemetrics_url.clone(),
            ProviderKind::RustServers => self.provider.rust_servers_url.clone(),
        };

        ProviderConfig {
            provider_id: self.provider.use_api,
            endpoint_url,
        }
    }
}
