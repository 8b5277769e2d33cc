//! Command-line argument types.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "No-Limit Hold'em engine: hand ranking, odds, self-play"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the best five-card hand among 5 to 7 cards
    Rank {
        /// Cards in compact notation, e.g. "AsKsQd7c2h"
        #[arg(long)]
        cards: String,
    },
    /// Win/tie/loss odds for a hand against a known or random opponent
    Odds {
        #[arg(long)]
        hero: String,
        /// Opponent hole cards; a random hand when omitted
        #[arg(long)]
        villain: Option<String>,
        /// Known community cards (0, 3, 4 or 5)
        #[arg(long)]
        board: Option<String>,
        #[arg(long)]
        trials: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Spread the trials over all cores
        #[arg(long)]
        parallel: bool,
    },
    /// Deal one hand and show every card
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        players: Option<usize>,
    },
    /// Play hands against the baseline policy
    Play {
        #[arg(long, value_enum, default_value_t = Vs::Human)]
        vs: Vs,
        #[arg(long)]
        hands: Option<u32>,
        #[arg(long)]
        players: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=20))]
        level: Option<u8>,
    },
    /// Self-play a batch of hands between baseline policies
    Sim {
        #[arg(long)]
        hands: usize,
        #[arg(long)]
        players: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=20))]
        level: Option<u8>,
        /// Append the hands to this JSONL file
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Who sits in seat 0 for the `play` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Vs {
    /// You, answering prompts on stdin
    Human,
    /// Another baseline policy; the table plays itself
    Ai,
}

impl Vs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vs::Human => "human",
            Vs::Ai => "ai",
        }
    }
}
