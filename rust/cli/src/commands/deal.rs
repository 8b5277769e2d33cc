//! Deal command handler for single hand dealing and display.
//!
//! Deals hole cards for every seat plus a complete board from a seeded
//! deck, so the same seed always shows the same hand.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_board;
use holdem_engine::cards::{MAX_PLAYERS, MIN_PLAYERS};
use holdem_engine::deck::Deck;
use std::io::Write;

pub fn handle_deal_command(
    seed: Option<u64>,
    players: Option<usize>,
    cfg: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let players = players.unwrap_or(cfg.players);
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
        return Err(CliError::InvalidInput(format!(
            "players must be between {} and {}",
            MIN_PLAYERS, MAX_PLAYERS
        )));
    }
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let deal = Deck::new_with_seed(seed)
        .deal_full(players)
        .map_err(|e| CliError::Engine(e.to_string()))?;

    writeln!(out, "Seed: {}", seed)?;
    for (seat, hole) in deal.hole_cards().iter().enumerate() {
        writeln!(out, "Seat {}: {}", seat, hole)?;
    }
    writeln!(out, "Board: {}", format_board(deal.board()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(seed: u64, players: usize) -> String {
        let mut out = Vec::new();
        handle_deal_command(Some(seed), Some(players), &Config::default(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_deal_command_deterministic() {
        assert_eq!(deal(12345, 2), deal(12345, 2));
    }

    #[test]
    fn test_deal_command_output_format() {
        let output = deal(999, 4);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Seed: 999");
        assert!(lines[1].starts_with("Seat 0: "));
        assert!(lines[4].starts_with("Seat 3: "));
        assert!(lines[5].starts_with("Board: "));
        assert_eq!(lines[5].split_whitespace().count(), 6);
    }

    #[test]
    fn test_deal_command_rejects_table_size() {
        let mut out = Vec::new();
        let result = handle_deal_command(Some(1), Some(11), &Config::default(), &mut out);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
