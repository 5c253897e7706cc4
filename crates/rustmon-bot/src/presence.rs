//! Presence updates through the Discord gateway.

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use rustmon_status::{PresenceSink, PublishError};

/// Publishes the status text as the bot's "Playing ..." activity.
pub struct GatewayPresence {
    ctx: serenity::Context,
}

impl GatewayPresence {
    /// Wraps the gateway context handed out on ready.
    pub const fn new(ctx: serenity::Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl PresenceSink for GatewayPresence {
    async fn set_presence(&self, activity: &str) -> Result<(), PublishError> {
        self.ctx.set_presence(
            Some(serenity::ActivityData::playing(activity)),
            serenity::OnlineStatus::Online,
        );
        Ok(())
    }
}
