//! Next forced wipe command.

use crate::framework::{Context, Error};
use chrono::{NaiveDate, NaiveTime, Utc};
use rustmon_common::{format_full_date, user_mention};
use rustmon_config::Config;
use rustmon_i18n::{Messages, FALLBACK_LANGUAGE};
use rustmon_status::next_wipe_date;
use std::fmt::Write;

/// Formats the wipe time with the language's `time-format` pattern.
fn localized_time(time: NaiveTime, language: &str) -> String {
    let pattern = Messages::get("time-format", language);
    let mut text = String::new();
    if write!(text, "{}", time.format(&pattern)).is_err() {
        text = time.format("%H:%M").to_string();
    }
    text
}

/// Builds the reply for the `wipe` command as seen from `today`.
///
/// The greeting is rendered once, followed by one line per configured language.
pub fn wipe_reply(config: &Config, user_id: u64, today: NaiveDate) -> Result<String, Error> {
    let wipe_day = format_full_date(next_wipe_date(today));
    let time = config.wipe.time_of_day()?;
    let languages = &config.messages.languages;

    let greeting_language = languages.first().map_or(FALLBACK_LANGUAGE, String::as_str);
    let mut lines = vec![Messages::get_with_args(
        "greeting",
        greeting_language,
        &[("user", &user_mention(user_id))],
    )];

    for language in languages {
        let time_text = localized_time(time, language);
        lines.push(Messages::get_with_args(
            "wipe-line",
            language,
            &[("date", &wipe_day), ("time", &time_text)],
        ));
    }

    Ok(lines.join("\n"))
}

/// Shows the date of the next forced wipe.
#[poise::command(slash_command)]
pub async fn wipe(ctx: Context<'_>) -> Result<(), Error> {
    let config = &ctx.data().config;
    let timezone = config.wipe.timezone()?;
    let today = Utc::now().with_timezone(&timezone).date_naive();

    let reply = wipe_reply(config, ctx.author().id.get(), today)?;
    ctx.say(reply).await?;
    Ok(())
}
