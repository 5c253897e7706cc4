//! # Rustmon Commands
//!
//! Discord slash commands using the Poise framework for Rustmon.
//!
//! The commands answer with the server connect string, the donation link
//! and the next forced wipe date. Reply texts come from `rustmon-i18n`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod donate;
pub mod framework;
pub mod ip;
pub mod wipe;

pub use framework::*;
