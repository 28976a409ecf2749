//! Subcommand handlers for the `lectern` binary.

pub mod check;
pub mod completions;
pub mod config;
pub mod info;
pub mod play;
