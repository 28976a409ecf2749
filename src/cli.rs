//! Command-line definition.
//!
//! Lives in the library so `xtask` can render the man page from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Terminal player for narrated slide lectures
#[derive(Debug, Parser)]
#[command(
    name = "lectern",
    version,
    about,
    long_about = "Lectern plays narrated slide lectures in the terminal.\n\n\
        Each slide advances when its narration finishes. Slides without \
        narration advance on a timer using their nominal duration."
)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv). LECTERN_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to a file
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a lecture file
    Play(PlayArgs),

    /// Show a lecture's slides, durations and narration coverage
    Info {
        /// Lecture file (.toml or .json)
        lesson: PathBuf,

        /// Narration root (default: audio/ next to the lecture file)
        #[arg(long, value_name = "DIR")]
        audio_dir: Option<PathBuf>,
    },

    /// Validate every lecture file in a directory
    Check {
        /// Directory containing lecture files
        dir: PathBuf,

        /// Narration root (default: <DIR>/audio)
        #[arg(long, value_name = "DIR")]
        audio_dir: Option<PathBuf>,
    },

    /// Show or edit the configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Lecture file (.toml or .json)
    pub lesson: PathBuf,

    /// Narration root (default: audio/ next to the lecture file)
    #[arg(long, value_name = "DIR")]
    pub audio_dir: Option<PathBuf>,

    /// Ignore narration; advance every slide on a timer
    #[arg(long)]
    pub no_narration: bool,

    /// Open paused instead of playing immediately
    #[arg(long)]
    pub paused: bool,

    /// Slide to open at (1-based)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub start_slide: Option<u64>,

    /// Fallback timer tick interval in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: Option<u64>,

    /// Print progress lines instead of drawing the player
    #[arg(long)]
    pub headless: bool,

    /// Don't record completion in the progress store
    #[arg(long)]
    pub no_record: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the current configuration
    Show,
    /// Open the configuration file in $EDITOR
    Edit,
    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn play_parses_options() {
        let cli = Cli::try_parse_from([
            "lectern",
            "-vv",
            "play",
            "lesson1.toml",
            "--no-narration",
            "--start-slide",
            "3",
            "--tick-ms",
            "10",
            "--headless",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Play(args) => {
                assert_eq!(args.lesson, PathBuf::from("lesson1.toml"));
                assert!(args.no_narration);
                assert!(args.headless);
                assert_eq!(args.start_slide, Some(3));
                assert_eq!(args.tick_ms, Some(10));
                assert!(!args.paused);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn start_slide_zero_is_rejected() {
        assert!(Cli::try_parse_from(["lectern", "play", "l.toml", "--start-slide", "0"]).is_err());
    }

    #[test]
    fn config_subcommands_parse() {
        let cli = Cli::try_parse_from(["lectern", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Path)));
    }
}
