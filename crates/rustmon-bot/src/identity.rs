//! Startup check of the Discord token against the identity endpoint.

use crate::error::{BotError, BotResult};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Discord endpoint describing the authenticated user.
pub const IDENTITY_URL: &str = "https://discord.com/api/v10/users/@me";

/// The bot account a token belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct BotIdentity {
    /// Snowflake of the bot user.
    pub id: String,
    /// Account name.
    #[serde(default)]
    pub username: String,
}

/// Verifies `token` against Discord before connecting to the gateway.
pub async fn verify_credential(token: &str, timeout: Duration) -> BotResult<BotIdentity> {
    verify_credential_at(IDENTITY_URL, token, timeout).await
}

/// Verifies `token` against an identity endpoint at `url`.
///
/// Any answer without an `id` field counts as an invalid token.
pub async fn verify_credential_at(
    url: &str,
    token: &str,
    timeout: Duration,
) -> BotResult<BotIdentity> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| BotError::Credential(format!("cannot build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .header(AUTHORIZATION, format!("Bot {token}"))
        .send()
        .await
        .map_err(|e| BotError::Credential(format!("identity request failed: {e}")))?;
    debug!(status = %response.status(), "Identity endpoint answered");

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| BotError::Credential(format!("unreadable identity response: {e}")))?;

    if body.get("id").and_then(serde_json::Value::as_str).is_none() {
        return Err(BotError::Credential(
            "identity response has no user id".to_string(),
        ));
    }

    serde_json::from_value(body)
        .map_err(|e| BotError::Credential(format!("unexpected identity response: {e}")))
}
