//! Upstream status APIs and their response schemas.

use crate::error::UpstreamError;
use crate::record::{ServerStatus, StatusRecord};
use crate::traits::StatusSource;
use async_trait::async_trait;
use chrono::NaiveDate;
use rustmon_config::{Config, ProviderConfig, ProviderKind};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// The active upstream API together with its endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusProvider {
    /// BattleMetrics: nested `data.attributes` document with queue and wipe details.
    BattleMetrics {
        /// Server document URL.
        url: String,
    },
    /// rust-servers.net: flat document served as `text/html`.
    RustServers {
        /// Server detail URL.
        url: String,
    },
}

impl From<&ProviderConfig> for StatusProvider {
    fn from(config: &ProviderConfig) -> Self {
        let url = config.endpoint_url.clone();
        match config.provider_id {
            ProviderKind::BattleMetrics => Self::BattleMetrics { url },
            ProviderKind::RustServers => Self::RustServers { url },
        }
    }
}

impl StatusProvider {
    /// Which API this is.
    pub const fn kind(&self) -> ProviderKind {
        match self {
            Self::BattleMetrics { .. } => ProviderKind::BattleMetrics,
            Self::RustServers { .. } => ProviderKind::RustServers,
        }
    }

    /// Endpoint queried on every poll.
    pub fn url(&self) -> &str {
        match self {
            Self::BattleMetrics { url } | Self::RustServers { url } => url,
        }
    }

    /// Parses a response body according to this provider's schema.
    pub fn parse(&self, body: &str) -> Result<StatusRecord, UpstreamError> {
        match self {
            Self::BattleMetrics { .. } => parse_battlemetrics(body),
            Self::RustServers { .. } => parse_rust_servers(body),
        }
    }
}

#[derive(Deserialize)]
struct BattleMetricsDocument {
    data: BattleMetricsData,
}

#[derive(Deserialize)]
struct BattleMetricsData {
    attributes: BattleMetricsAttributes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BattleMetricsAttributes {
    status: String,
    #[serde(default)]
    players: Value,
    #[serde(default)]
    max_players: Value,
    #[serde(default)]
    details: Value,
}

fn parse_battlemetrics(body: &str) -> Result<StatusRecord, UpstreamError> {
    let document: BattleMetricsDocument = serde_json::from_str(body)
        .map_err(|e| UpstreamError::schema(format!("battlemetrics: {e}")))?;
    let attributes = document.data.attributes;

    let status = if attributes.status == "online" {
        ServerStatus::Online {
            current: required_count(&attributes.players, "players")?,
            max: required_count(&attributes.max_players, "maxPlayers")?,
        }
    } else {
        ServerStatus::Offline
    };

    let queued_players = attributes
        .details
        .get("rust_queued_players")
        .and_then(count)
        .unwrap_or(0);
    let last_wipe = attributes
        .details
        .get("rust_last_wipe")
        .and_then(Value::as_str)
        .and_then(wipe_date);

    Ok(StatusRecord {
        status,
        queued_players,
        last_wipe,
    })
}

fn parse_rust_servers(body: &str) -> Result<StatusRecord, UpstreamError> {
    let document: Value = serde_json::from_str(body.trim())
        .map_err(|e| UpstreamError::schema(format!("rust-servers.net: {e}")))?;

    let is_online = document
        .get("is_online")
        .ok_or_else(|| UpstreamError::schema("rust-servers.net: missing 'is_online'"))?;

    if is_online.as_str() != Some("1") {
        return Ok(StatusRecord::offline());
    }

    let current = document.get("players").unwrap_or(&Value::Null);
    let max = document.get("maxplayers").unwrap_or(&Value::Null);
    Ok(StatusRecord::online(
        required_count(current, "players")?,
        required_count(max, "maxplayers")?,
    ))
}

/// Reads a player count given either as a JSON number or a numeric string.
fn count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn required_count(value: &Value, field: &str) -> Result<u32, UpstreamError> {
    count(value).ok_or_else(|| UpstreamError::schema(format!("missing or invalid '{field}'")))
}

/// Date portion of an ISO-8601 timestamp.
fn wipe_date(timestamp: &str) -> Option<NaiveDate> {
    let date = timestamp.split('T').next()?;
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// HTTP client for the configured provider.
pub struct StatusFetcher {
    client: reqwest::Client,
    provider: StatusProvider,
}

impl StatusFetcher {
    /// Creates a fetcher whose requests are bounded by `timeout`.
    pub fn new(provider: StatusProvider, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rustmon/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, provider })
    }

    /// Creates a fetcher for the provider selected in `config`.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        let provider = StatusProvider::from(&config.provider_config());
        Self::new(provider, config.polling.request_timeout())
    }

    /// The provider this fetcher queries.
    pub const fn provider(&self) -> &StatusProvider {
        &self.provider
    }
}

#[async_trait]
impl StatusSource for StatusFetcher {
    #[instrument(skip(self), fields(provider = %self.provider.kind()))]
    async fn fetch_status(&self) -> Result<StatusRecord, UpstreamError> {
        let response = self.client.get(self.provider.url()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::HttpStatus {
                status: status.as_u16(),
            });
        }

        // rust-servers.net labels its JSON as text/html, so read the raw body
        let body = response.text().await?;
        debug!(bytes = body.len(), "Upstream request successful");

        self.provider.parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustmon_common::test_utils::{date, provider_fixtures};

    fn battlemetrics() -> StatusProvider {
        StatusProvider::BattleMetrics {
            url: "https://api.battlemetrics.com/servers/1".to_string(),
        }
    }

    fn rust_servers() -> StatusProvider {
        StatusProvider::RustServers {
            url: "https://rust-servers.net/api/".to_string(),
        }
    }

    #[test]
    fn test_battlemetrics_online_with_queue() {
        let record = battlemetrics()
            .parse(provider_fixtures::battlemetrics_online())
            .unwrap();

        assert_eq!(record.status, ServerStatus::Online { current: 148, max: 150 });
        assert_eq!(record.queued_players, 7);
        assert_eq!(record.last_wipe, Some(date(2024, 3, 7)));
    }

    #[test]
    fn test_battlemetrics_offline_ignores_counts() {
        let body = r#"{"data":{"attributes":{"status":"offline","players":null,"maxPlayers":null}}}"#;
        let record = battlemetrics().parse(body).unwrap();

        assert_eq!(record, StatusRecord::offline());
    }

    #[test]
    fn test_battlemetrics_unknown_status_is_offline() {
        let body = r#"{"data":{"attributes":{"status":"dead","players":3,"maxPlayers":10}}}"#;
        assert!(!battlemetrics().parse(body).unwrap().is_online());
    }

    #[test]
    fn test_battlemetrics_missing_details_degrade() {
        let body = r#"{"data":{"attributes":{"status":"online","players":5,"maxPlayers":50}}}"#;
        let record = battlemetrics().parse(body).unwrap();

        assert_eq!(record, StatusRecord::online(5, 50));
    }

    #[test]
    fn test_battlemetrics_malformed_optional_fields_degrade() {
        let body = r#"{"data":{"attributes":{"status":"online","players":5,"maxPlayers":50,
            "details":{"rust_queued_players":"lots","rust_last_wipe":"yesterday"}}}}"#;
        let record = battlemetrics().parse(body).unwrap();

        assert_eq!(record.queued_players, 0);
        assert_eq!(record.last_wipe, None);
    }

    #[test]
    fn test_battlemetrics_missing_counts_when_online_fail() {
        let body = r#"{"data":{"attributes":{"status":"online","maxPlayers":50}}}"#;
        assert!(matches!(
            battlemetrics().parse(body),
            Err(UpstreamError::Schema(_))
        ));
    }

    #[test]
    fn test_battlemetrics_missing_status_fails() {
        let body = r#"{"data":{"attributes":{"players":5,"maxPlayers":50}}}"#;
        assert!(battlemetrics().parse(body).is_err());
    }

    #[test]
    fn test_rust_servers_online() {
        let record = rust_servers()
            .parse(provider_fixtures::rust_servers_online())
            .unwrap();

        assert_eq!(record, StatusRecord::online(37, 200));
    }

    #[test]
    fn test_rust_servers_offline() {
        let record = rust_servers()
            .parse(provider_fixtures::rust_servers_offline())
            .unwrap();

        assert_eq!(record, StatusRecord::offline());
    }

    #[test]
    fn test_rust_servers_numeric_flag_is_offline() {
        let body = r#"{"is_online":1,"players":"3","maxplayers":"10"}"#;
        assert!(!rust_servers().parse(body).unwrap().is_online());
    }

    #[test]
    fn test_rust_servers_requires_flag() {
        let body = r#"{"players":"3","maxplayers":"10"}"#;
        assert!(rust_servers().parse(body).is_err());
    }

    #[test]
    fn test_rust_servers_non_json_body() {
        assert!(rust_servers().parse("Error: no server key").is_err());
    }

    #[test]
    fn test_provider_from_config() {
        let config = ProviderConfig {
            provider_id: ProviderKind::RustServers,
            endpoint_url: "https://rust-servers.net/api/".to_string(),
        };
        let provider = StatusProvider::from(&config);

        assert_eq!(provider.kind(), ProviderKind::RustServers);
        assert_eq!(provider.url(), "https://rust-servers.net/api/");
    }

    #[test]
    fn test_count_accepts_numbers_and_strings() {
        assert_eq!(count(&Value::from(12)), Some(12));
        assert_eq!(count(&Value::from(" 12 ")), Some(12));
        assert_eq!(count(&Value::from(-1)), None);
        assert_eq!(count(&Value::Null), None);
    }
}
