//! # holdem CLI Library
//!
//! Command-line front end for the Hold'em engine: rank hands, estimate odds,
//! deal, play against the baseline policy and run self-play batches.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, resolves the configuration and dispatches to
//! a subcommand. It writes to the streams it is given and returns the process
//! exit code, so tests can drive it with in-memory buffers.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = holdem_cli::run(["holdem", "rank", "--cards", "AsKsQsJsTs"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Straight Flush"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `rank`: Best five-card hand among 5 to 7 cards
//! - `odds`: Win/tie/loss odds against a known or random hand
//! - `deal`: Deal a single hand for inspection
//! - `play`: Play a session against baseline policies
//! - `sim`: Self-play a batch of hands, optionally recording them as JSONL
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::{BufRead, BufReader, Write};

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod logging;
pub mod ui;

use cli::{Commands, HoldemCli};
use commands::{
    OddsArgs, PlayArgs, SimArgs, handle_cfg_command, handle_deal_command, handle_odds_command,
    handle_play_command, handle_rank_command, handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["rank", "odds", "deal", "play", "sim", "cfg"];

/// Main entry point. Human input for `play` is read from stdin.
///
/// Returns `0` on success and `2` on any error, including usage errors.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    run_with_input(args, Box::new(BufReader::new(std::io::stdin())), out, err)
}

/// Like [`run`], reading the human seat's decisions from `input`.
pub fn run_with_input<I, S>(
    args: I,
    input: Box<dyn BufRead + Send>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    match dispatch(cli.cmd, input, out) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and succeed.
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "Usage: holdem <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: holdem --help");
    exit_code::ERROR
}

fn dispatch(
    cmd: Commands,
    input: Box<dyn BufRead + Send>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    let cfg = &resolved.config;
    match cmd {
        Commands::Rank { cards } => handle_rank_command(&cards, out),
        Commands::Odds {
            hero,
            villain,
            board,
            trials,
            seed,
            parallel,
        } => {
            let args = OddsArgs {
                hero,
                villain,
                board,
                trials,
                seed,
                parallel,
            };
            handle_odds_command(&args, cfg, out)
        }
        Commands::Deal { seed, players } => handle_deal_command(seed, players, cfg, out),
        Commands::Play {
            vs,
            hands,
            players,
            seed,
            level,
        } => {
            let args = PlayArgs {
                vs,
                hands,
                players,
                seed,
                level,
            };
            handle_play_command(&args, cfg, input, out)
        }
        Commands::Sim {
            hands,
            players,
            seed,
            level,
            output,
        } => {
            let args = SimArgs {
                hands,
                players,
                seed,
                level,
                output,
            };
            handle_sim_command(&args, cfg, out)
        }
        Commands::Cfg => handle_cfg_command(&resolved, out),
    }
}
