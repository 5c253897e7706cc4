//! Connect string command.

use crate::framework::{reply_language, Context, Error};
use rustmon_common::user_mention;
use rustmon_config::GameServerConfig;
use rustmon_i18n::Messages;

/// Builds the reply for the `ip` command.
pub fn ip_reply(server: &GameServerConfig, user_id: u64, language: &str) -> String {
    let address = format!("{}:{}", server.ip, server.port);
    Messages::get_with_args(
        "ip-reply",
        language,
        &[("user", &user_mention(user_id)), ("address", &address)],
    )
}

/// Shows the F1 console command to connect to the game server.
#[poise::command(slash_command)]
pub async fn ip(ctx: Context<'_>) -> Result<(), Error> {
    let reply = ip_reply(
        &ctx.data().config.game_server,
        ctx.author().id.get(),
        reply_language(ctx),
    );

    ctx.say(reply).await?;
    Ok(())
}
