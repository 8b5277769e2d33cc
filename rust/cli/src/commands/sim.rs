//! `sim`: self-play between baseline policies.
//!
//! Hands are independent: each gets fresh random stacks, button and seating
//! from its own seed, and they run in parallel. With `--output` every hand
//! is appended to a JSONL history.

use crate::config::Config;
use crate::error::CliError;
use holdem_ai::PolicyKind;
use holdem_ai::simulate::{BatchConfig, run_batch};
use holdem_engine::logger::HandLogger;
use std::io::Write;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimArgs {
    pub hands: usize,
    pub players: Option<usize>,
    pub seed: Option<u64>,
    pub level: Option<u8>,
    pub output: Option<String>,
}

pub fn handle_sim_command(
    args: &SimArgs,
    cfg: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if args.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let batch = BatchConfig {
        hands: args.hands,
        seed,
        level: args.level.unwrap_or(cfg.level),
        policies: vec![PolicyKind::Baseline; args.players.unwrap_or(cfg.players)],
    };
    let played = run_batch(&batch)?;

    if let Some(path) = &args.output {
        let mut logger = HandLogger::create(path)?;
        for hand in &played {
            let id = logger.next_id();
            logger.write(&hand.record(id))?;
        }
    }

    let showdowns = played
        .iter()
        .filter(|h| h.outcome.results.showdown.is_some())
        .count();
    let total_pot: u64 = played
        .iter()
        .map(|h| u64::from(h.outcome.state.pot()))
        .sum();
    let illegal: usize = played.iter().map(|h| h.outcome.illegal_proposals).sum();
    let imbalance: i64 = played
        .iter()
        .map(|h| h.outcome.results.rewards.iter().sum::<i64>())
        .sum();

    writeln!(
        out,
        "sim: hands={} players={} seed={}",
        played.len(),
        batch.policies.len(),
        seed
    )?;
    writeln!(out, "Showdowns: {}", showdowns)?;
    writeln!(out, "Average pot: {:.1}", total_pot as f64 / played.len() as f64)?;
    writeln!(out, "Illegal proposals: {}", illegal)?;
    writeln!(out, "Chip imbalance: {}", imbalance)?;
    if let Some(path) = &args.output {
        writeln!(out, "Wrote {} hands to {}", played.len(), path)?;
    }
    Ok(())
}
