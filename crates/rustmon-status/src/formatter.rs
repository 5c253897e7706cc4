//! Presence text rendering.

use crate::record::{ServerStatus, StatusRecord};
use rustmon_common::format_day_month;

/// Renders the presence text for a status record.
///
/// `offline`, `{current}/{max}` or `{current}/{max} (+{queued})`, each
/// followed by ` | Wipe: DD.MM.` when the last wipe date is known.
pub fn format_activity(record: &StatusRecord) -> String {
    let mut activity = match record.status {
        ServerStatus::Offline => "offline".to_string(),
        ServerStatus::Online { current, max } if record.queued_players > 0 => {
            format!("{current}/{max} (+{})", record.queued_players)
        }
        ServerStatus::Online { current, max } => format!("{current}/{max}"),
    };

    if let Some(last_wipe) = record.last_wipe {
        activity.push_str(" | Wipe: ");
        activity.push_str(&format_day_month(last_wipe));
    }

    activity
}
