//! Date helpers shared by the presence formatter and the command replies.

use chrono::NaiveDate;

/// Formats a date as `DD.MM.`, the short form shown in the presence text.
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d.%m.").to_string()
}

/// Formats a date as `DD.MM.YYYY`.
pub fn format_full_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Mentions a Discord user by ID.
pub fn user_mention(user_id: u64) -> String {
    format!("<@{user_id}>")
}
