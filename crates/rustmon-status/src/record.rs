//! Provider-agnostic server status.

use chrono::NaiveDate;

/// Whether the server is reachable, with player counts when it is.
///
/// `current <= max` is not enforced; upstream values are passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    /// The server is up.
    Online {
        /// Connected players.
        current: u32,
        /// Player slots.
        max: u32,
    },
    /// The server is down or reported in an unknown state.
    Offline,
}

/// Normalized status of the monitored server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    /// Online state and player counts.
    pub status: ServerStatus,
    /// Players waiting for a slot.
    pub queued_players: u32,
    /// Date of the last wipe, when the provider reports one.
    pub last_wipe: Option<NaiveDate>,
}

impl StatusRecord {
    /// An online record without queue or wipe information.
    pub const fn online(current: u32, max: u32) -> Self {
        Self {
            status: ServerStatus::Online { current, max },
            queued_players: 0,
            last_wipe: None,
        }
    }

    /// An offline record without wipe information.
    pub const fn offline() -> Self {
        Self {
            status: ServerStatus::Offline,
            queued_players: 0,
            last_wipe: None,
        }
    }

    /// Sets the queue length.
    #[must_use]
    pub const fn with_queue(mut self, queued_players: u32) -> Self {
        self.queued_players = queued_players;
        self
    }

    /// Sets the last wipe date.
    #[must_use]
    pub const fn with_last_wipe(mut self, last_wipe: Option<NaiveDate>) -> Self {
        self.last_wipe = last_wipe;
        self
    }

    /// True when the server is up.
    pub const fn is_online(&self) -> bool {
        matches!(self.status, ServerStatus::Online { .. })
    }
}
