//! Poise framework setup and command registration logic.

use rustmon_config::Config;
use rustmon_i18n::Messages;
use std::sync::Arc;
use tracing::{error, info};

/// Application data accessible in all commands.
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// All slash commands exposed by the bot.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        crate::ip::ip(),
        crate::wipe::wipe(),
        crate::donate::donate(),
    ]
}

/// Creates a new Poise framework.
pub fn create_framework() -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: commands(),
        pre_command: |ctx| Box::pin(log_invocation(ctx)),
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    })
}

/// Language for a reply: the invoking user's client locale, else the first
/// configured language.
pub fn reply_language<'a>(ctx: Context<'a>) -> &'a str {
    ctx.locale()
        .or_else(|| ctx.data().config.messages.languages.first().map(String::as_str))
        .unwrap_or(rustmon_i18n::FALLBACK_LANGUAGE)
}

async fn log_invocation(ctx: Context<'_>) {
    let guild = ctx
        .guild_id()
        .map_or_else(|| "direct message".to_string(), |id| id.to_string());

    info!(
        user_id = %ctx.author().id,
        channel_id = %ctx.channel_id(),
        "{} : {} used the {} command",
        guild,
        ctx.author().name,
        ctx.command().name
    );
}

/// Global error handler for the framework.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, "Error in command: {}", error);
            let reply = Messages::get("command-failed", reply_language(ctx));
            if let Err(e) = ctx.say(reply).await {
                error!("Failed to report command error: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling framework error: {}", e);
            }
        }
    }
}
