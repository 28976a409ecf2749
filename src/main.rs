//! Lectern CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use lectern::cli::{Cli, Commands, ConfigCommands};
use lectern::logging::{self, LogTarget};

/// Pick where logs go for this invocation.
///
/// The full-screen player owns the terminal, so it only logs to a file.
fn log_target(cli: &Cli) -> LogTarget {
    let interactive = match &cli.command {
        Commands::Play(args) => !commands::play::is_headless(args),
        _ => false,
    };
    match (&cli.log_file, interactive) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::Off,
        (None, false) => LogTarget::Stderr,
    }
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, log_target(&cli))?;

    match cli.command {
        Commands::Play(args) => commands::play::handle(&args),
        Commands::Info { lesson, audio_dir } => commands::info::handle(&lesson, audio_dir.as_ref()),
        Commands::Check { dir, audio_dir } => {
            if !commands::check::handle(&dir, audio_dir.as_ref())? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Edit => commands::config::handle_edit(),
            ConfigCommands::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
    }
}
