//! gbgen CLI library.
//!
//! Exposes the command implementations and output formatters so they can
//! be exercised from tests without spawning the binary.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unused_async)]

pub mod commands;
pub mod formatters;

pub use commands::common::ConfigArgs;
