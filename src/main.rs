//! Warlight CLI - play the Warlight line protocol or check a strategy offline.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use std::process::ExitCode;

/// Warlight - a territorial-conquest game agent
#[derive(Parser, Debug)]
#[command(name = "warlight")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log more to stderr (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one game, reading host commands from stdin
    Play {
        #[command(flatten)]
        agent: cli::AgentOptions,
    },

    /// Replay a recorded pick and turn on the standard map
    Check {
        #[command(flatten)]
        agent: cli::AgentOptions,

        /// Number of placement/attack rounds to play on the sample position
        #[arg(short, long, default_value = "1")]
        turns: u32,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Play { agent } => cli::play::execute(&agent),
        Commands::Check { agent, turns } => cli::check::execute(&agent, turns),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
