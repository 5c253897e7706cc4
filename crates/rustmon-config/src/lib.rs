//! # Rustmon Config
//!
//! Type-safe configuration management for Rustmon.
//!
//! The configuration is read once at startup, validated, and then shared
//! immutably with the poller and the command handlers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
