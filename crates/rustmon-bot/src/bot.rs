//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use crate::presence::GatewayPresence;
use poise::serenity_prelude as serenity;
use rustmon_commands::{create_framework, Data};
use rustmon_config::Config;
use rustmon_status::{PollScheduler, StatusFetcher};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// OAuth2 URL that adds the bot with the scopes its commands need.
pub fn invite_url(client_id: u64) -> String {
    format!(
        "https://discord.com/api/oauth2/authorize?client_id={client_id}&scope=applications.commands%20bot"
    )
}

/// Main bot structure.
pub struct RustmonBot {
    config: Arc<Config>,
    shutdown: CancellationToken,
}

impl RustmonBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            shutdown: CancellationToken::new(),
        }
    }

    /// Token that stops the poller and the gateway connection when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Starts the bot and runs until the gateway connection ends.
    ///
    /// The status poller is spawned once, from the framework setup hook that
    /// runs on the first ready event.
    pub async fn start(&self) -> BotResult<()> {
        let fetcher = StatusFetcher::from_config(&self.config)?;
        info!(
            provider = %fetcher.provider().kind(),
            url = fetcher.provider().url(),
            "Status provider selected"
        );

        let mut scheduler = PollScheduler::new(
            fetcher,
            self.config.polling.update_interval(),
            self.config.polling.publish_timeout(),
        );
        scheduler.await_gateway();

        let config = Arc::clone(&self.config);
        let poller_shutdown = self.shutdown.clone();
        let framework = create_framework()
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Logged in as {} (ID: {})", ready.user.name, ready.user.id);
                    info!(
                        "Use this URL to invite {} to your server: {}",
                        ready.user.name,
                        invite_url(ready.user.id.get())
                    );

                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Slash commands registered globally");

                    tokio::spawn(scheduler.run(GatewayPresence::new(ctx.clone()), poller_shutdown));
                    Ok(Data { config })
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(
            &self.config.discord.token,
            serenity::GatewayIntents::non_privileged(),
        )
        .framework(framework)
        .await?;

        let shard_manager = client.shard_manager.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        error!("Failed to listen for shutdown signal: {}", e);
                        return;
                    }
                    info!("Received shutdown signal, starting graceful shutdown");
                }
                () = shutdown.cancelled() => {}
            }

            shutdown.cancel();
            shard_manager.shutdown_all().await;
            info!("Discord client shutdown complete");
        });

        let result = client.start().await;
        self.shutdown.cancel();
        result?;

        info!("Rustmon has shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_url() {
        assert_eq!(
            invite_url(1234),
            "https://discord.com/api/oauth2/authorize?client_id=1234&scope=applications.commands%20bot"
        );
    }

    #[test]
    fn test_shutdown_token_is_shared() {
        let bot = RustmonBot::new(Config::default());
        let token = bot.shutdown_token();
        assert!(!token.is_cancelled());

        bot.shutdown_token().cancel();
        assert!(token.is_cancelled());
    }
}
