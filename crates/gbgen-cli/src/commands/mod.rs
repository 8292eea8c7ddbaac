//! Command implementations for the gbgen CLI.
//!
//! Each command loads what it needs, does its work, and prints a summary in
//! the requested output format. Commands return an [`ExitCode`] on success;
//! failures are reported by `main`, which maps them with
//! [`common::exit_code_for`].
//!
//! [`ExitCode`]: gbgen_core::cli::ExitCode

pub mod check;
pub mod common;
pub mod completions;
pub mod feature;
pub mod generate;
pub mod init;
pub mod version;
