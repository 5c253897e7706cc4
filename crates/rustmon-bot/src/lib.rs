//! # Rustmon Bot
//!
//! Discord bot that mirrors the live status of a Rust game server in its
//! presence and answers a few server-related slash commands.
//!
//! This is the main binary crate that orchestrates the application lifecycle
//! using the Poise framework for Discord interactions.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod identity;
pub mod logging;
pub mod presence;

pub use bot::*;
pub use error::*;
pub use identity::*;
pub use logging::*;
pub use presence::*;
