//! # Rustmon Status
//!
//! Live game server status for the Discord presence.
//!
//! This crate fetches the server status from one of the supported upstream
//! APIs, normalizes it into a [`StatusRecord`], renders the presence text and
//! drives the fixed-interval poll loop. It also computes the next scheduled
//! wipe date.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod formatter;
pub mod poller;
pub mod provider;
pub mod record;
pub mod traits;
pub mod wipe;

pub use error::*;
pub use formatter::*;
pub use poller::*;
pub use provider::*;
pub use record::*;
pub use traits::*;
pub use wipe::*;
