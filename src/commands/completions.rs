//! Completions command handler

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use lectern::cli::Cli;

/// Write a completion script for `shell` to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
}
