//! # pk-core
//!
//! Shared types for the pk probability crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::{Error, Result};
