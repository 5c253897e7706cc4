//! # Rustmon I18n
//!
//! Localized command replies using the Fluent localization system.
//!
//! Locale files are embedded at compile time and checked for syntax and
//! key parity by the build script.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod messages;

pub use loader::*;
pub use messages::*;
