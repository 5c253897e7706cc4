//! Test utilities and shared test helpers for Rustmon.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use chrono::NaiveDate;
use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Builds a calendar date, panicking on invalid input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("invalid test date")
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Sample upstream response bodies.
pub mod provider_fixtures {
    /// BattleMetrics server document for an online server with a queue and wipe date.
    pub fn battlemetrics_online() -> &'static str {
        r#"{
  "data": {
    "type": "server",
    "id": "1234567",
    "attributes": {
      "name": "Example Rust Server",
      "status": "online",
      "players": 148,
      "maxPlayers": 150,
      "details": {
        "rust_queued_players": 7,
        "rust_last_wipe": "2024-03-07T19:02:11.000Z"
      }
    }
  }
}"#
    }

    /// BattleMetrics server document for an online server with an empty queue.
    pub fn battlemetrics_online_no_queue() -> &'static str {
        r#"{
  "data": {
    "attributes": {
      "status": "online",
      "players": 42,
      "maxPlayers": 100,
      "details": {
        "rust_queued_players": 0,
        "rust_last_wipe": "2024-03-07T19:02:11.000Z"
      }
    }
  }
}"#
    }

    /// BattleMetrics server document for an offline server.
    pub fn battlemetrics_offline() -> &'static str {
        r#"{
  "data": {
    "attributes": {
      "status": "offline",
      "players": 0,
      "maxPlayers": 150,
      "details": {
        "rust_last_wipe": "2024-03-07T19:02:11.000Z"
      }
    }
  }
}"#
    }

    /// rust-servers.net detail document for an online server.
    pub fn rust_servers_online() -> &'static str {
        r#"{"id":"123456","name":"Example Rust Server","address":"play.example.com","port":"28015","is_online":"1","players":"37","maxplayers":"200"}"#
    }

    /// rust-servers.net detail document for an offline server.
    pub fn rust_servers_offline() -> &'static str {
        r#"{"id":"123456","name":"Example Rust Server","is_online":"0","players":"0","maxplayers":"200"}"#
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A minimal valid configuration in the JSON layout.
    pub fn minimal_config_json() -> &'static str {
        r#"{
  "discord": { "token": "test_token" },
  "provider": {
    "use_api": "1",
    "battlemetrics_url": "https://api.battlemetrics.com/servers/1234567"
  },
  "game_server": { "ip": "203.0.113.10", "port": 28015 }
}"#
    }

    /// A full configuration in the YAML layout.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "discord:\n",
            "  token: \"test_token_full\"\n",
            "\n",
            "polling:\n",
            "  update_interval_minutes: 2\n",
            "  request_timeout_seconds: 15\n",
            "  publish_timeout_seconds: 5\n",
            "\n",
            "provider:\n",
            "  use_api: rust_servers\n",
            "  battlemetrics_url: \"https://api.battlemetrics.com/servers/1234567\"\n",
            "  rust_servers_url: \"https://rust-servers.net/api/?object=servers&element=detail&key=abc\"\n",
            "\n",
            "game_server:\n",
            "  ip: \"203.0.113.10\"\n",
            "  port: 28016\n",
            "\n",
            "wipe:\n",
            "  timezone: \"Europe/London\"\n",
            "  time: \"19:00\"\n",
            "\n",
            "donation:\n",
            "  url: \"https://example.com/donate\"\n",
            "\n",
            "messages:\n",
            "  languages: [\"en-US\"]\n",
        )
    }

    /// A full configuration in the TOML layout.
    pub fn full_config_toml() -> &'static str {
        concat!(
            "[discord]\n",
            "token = \"test_token_toml\"\n",
            "\n",
            "[polling]\n",
            "update_interval_minutes = 10\n",
            "\n",
            "[provider]\n",
            "use_api = \"battlemetrics\"\n",
            "battlemetrics_url = \"https://api.battlemetrics.com/servers/7654321\"\n",
            "\n",
            "[game_server]\n",
            "ip = \"198.51.100.4\"\n",
            "port = 28015\n",
        )
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    /// Strategy for calendar dates between 1990 and 2100.
    pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (1990i32..=2100i32, 1u32..=12u32, 1u32..=28u32)
            .prop_map(|(year, month, day)| super::date(year, month, day))
    }
}
