//! # pokeher CLI Library
//!
//! Command-line front end for the pokeher hand engine: bot-vs-bot
//! simulation, showdown ranking, and configuration inspection.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["pokeher", "sim", "--hands", "10", "--seed", "7"];
//! let code = pokeher_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Play a run of hands between bots
//! - `showdown`: Rank hole cards against a board and split a pot
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, PokeherCli};
use commands::sim::SimArgs;
use commands::{handle_cfg_command, handle_showdown_command, handle_sim_command};

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "showdown", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec![
///     "pokeher", "showdown", "--board", "5s Kc 3d Qc 9c",
///     "--hand", "aces=AhAs", "--hand", "junk=6c5d",
/// ];
/// let mut out = Vec::new();
/// let code = pokeher_cli::run(args, &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("Winner: aces"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match PokeherCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Sim {
            hands,
            bots,
            seed,
            stack,
            json,
        } => {
            let args = SimArgs {
                hands,
                bots,
                seed,
                stack,
                json,
            };
            handle_sim_command(&args, out, err)
        }
        Commands::Showdown { board, hands, pot } => {
            handle_showdown_command(&board, &hands, pot, out, err)
        }
        Commands::Cfg => handle_cfg_command(out, err),
    };

    if let Err(e) = &result {
        let _ = writeln!(err, "Error: {}", e);
    }
    exit_code::for_result(&result)
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            let _ = writeln!(err, "{}", e)
                .and_then(|()| writeln!(err))
                .and_then(|()| ui::write_usage(err, COMMANDS));
            exit_code::ERROR
        }
    }
}
