//! Donation link command.

use crate::framework::{reply_language, Context, Error};
use rustmon_common::user_mention;
use rustmon_i18n::Messages;

/// Builds the reply for the `donate` command.
pub fn donate_reply(url: &str, user_id: u64, language: &str) -> String {
    Messages::get_with_args(
        "donate-reply",
        language,
        &[("user", &user_mention(user_id)), ("url", url)],
    )
}

/// Sends the donation link.
#[poise::command(slash_command)]
pub async fn donate(ctx: Context<'_>) -> Result<(), Error> {
    let reply = donate_reply(
        &ctx.data().config.donation.url,
        ctx.author().id.get(),
        reply_language(ctx),
    );

    ctx.say(reply).await?;
    Ok(())
}
