//! # Rustmon Common
//!
//! Shared error types, utilities, and common functionality for Rustmon.
//!
//! This crate provides the foundational types and helpers used across
//! all other crates in the Rustmon workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use utils::*;
