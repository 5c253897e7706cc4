//! Startup validation of a loaded configuration.

use crate::schema::Config;
use rustmon_common::{Result, RustmonError};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first problem found.
    pub fn validate(config: &Config) -> Result<()> {
        if config.discord.token.trim().is_empty() {
            return Err(RustmonError::config("Discord token cannot be empty"));
        }

        if config.polling.update_interval_minutes == 0 {
            return Err(RustmonError::config(
                "update_interval_minutes must be greater than zero",
            ));
        }

        if config.polling.request_timeout_seconds == 0
            || config.polling.publish_timeout_seconds == 0
        {
            return Err(RustmonError::config("timeouts must be greater than zero"));
        }

        let provider = config.provider_config();
        if provider.endpoint_url.trim().is_empty() {
            return Err(RustmonError::config(format!(
                "no endpoint URL configured for provider {}",
                provider.provider_id
            )));
        }
        url::Url::parse(&provider.endpoint_url).map_err(|e| {
            RustmonError::config(format!(
                "invalid endpoint URL for provider {}: {e}",
                provider.provider_id
            ))
        })?;

        if config.game_server.ip.trim().is_empty() {
            return Err(RustmonError::config("game server ip cannot be empty"));
        }

        config.wipe.timezone()?;
        config.wipe.time_of_day()?;

        if config.messages.languages.is_empty()
            || config.messages.languages.iter().any(|l| l.trim().is_empty())
        {
            return Err(RustmonError::config(
                "messages.languages must list at least one language",
            ));
        }

        Ok(())
    }
}
