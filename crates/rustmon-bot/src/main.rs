//! Main entry point for Rustmon.

use rustmon_bot::{
    env_filter, init_logging, startup_subscriber, verify_credential, BotResult, RustmonBot,
};
use rustmon_config::ConfigLoader;
use tracing::instrument::WithSubscriber;
use tracing::{error, info};

#[tokio::main]
async fn main() -> BotResult<()> {
    // Logging settings live in the config file, so load it under a console-only subscriber
    let loader = ConfigLoader::from_env();
    let config = loader
        .load()
        .with_subscriber(startup_subscriber(env_filter(), std::io::stdout))
        .await?;
    let _log_guard = init_logging(&config.logging)?;

    info!("Starting Rustmon");
    info!(
        path = %loader.path().display(),
        provider = %config.provider.use_api,
        interval_minutes = config.polling.update_interval_minutes,
        "Configuration loaded"
    );

    config.validate()?;

    let identity = match verify_credential(&config.discord.token, config.polling.request_timeout()).await {
        Ok(identity) => identity,
        Err(e) => {
            error!("{}", e);
            return Err(e);
        }
    };
    info!("Discord token belongs to {} (ID: {})", identity.username, identity.id);

    let bot = RustmonBot::new(config);

    if let Err(e) = bot.start().await {
        error!("Bot stopped with an error: {}", e);
        return Err(e);
    }

    Ok(())
}
