//! `odds`: hero's equity against a known hand or a random one.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_board;
use holdem_engine::cards::{Board, HoleCards};
use holdem_engine::odds::{simulate_odds_parallel, simulate_odds_seeded};
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct OddsArgs {
    pub hero: String,
    pub villain: Option<String>,
    pub board: Option<String>,
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub parallel: bool,
}

pub fn handle_odds_command(
    args: &OddsArgs,
    cfg: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let hero: HoleCards = args.hero.parse()?;
    let villain: Option<HoleCards> = args.villain.as_deref().map(str::parse).transpose()?;
    let board: Board = match args.board.as_deref() {
        Some(b) => b.parse()?,
        None => Board::empty(),
    };
    let trials = args.trials.unwrap_or(cfg.trials);
    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);

    let odds = if args.parallel {
        simulate_odds_parallel(hero, villain, &board, trials, seed)?
    } else {
        simulate_odds_seeded(hero, villain, &board, trials, seed)?
    };

    let villain = villain.map_or_else(|| "random".to_string(), |v| v.to_string());
    writeln!(out, "Hero: {}  Villain: {}  Board: {}", hero, villain, format_board(&board))?;
    writeln!(out, "Seed: {}  Outcomes: {}", seed, odds.trials)?;
    writeln!(
        out,
        "Win: {:.2}%  Tie: {:.2}%  Loss: {:.2}%  Equity: {:.2}%",
        odds.win_rate() * 100.0,
        odds.tie_rate() * 100.0,
        odds.loss_rate() * 100.0,
        odds.equity() * 100.0
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: OddsArgs) -> Result<String, CliError> {
        let mut out = Vec::new();
        handle_odds_command(&args, &Config::default(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn complete_board_is_exact() {
        let text = run(OddsArgs {
            hero: "AcAd".into(),
            villain: Some("KcKd".into()),
            board: Some("Qd8s3c7h2d".into()),
            ..OddsArgs::default()
        })
        .unwrap();
        assert!(text.contains("Outcomes: 1"));
        assert!(text.contains("Win: 100.00%"));
    }

    #[test]
    fn seeded_runs_repeat() {
        let args = OddsArgs {
            hero: "AcAd".into(),
            trials: Some(3_000),
            seed: Some(9),
            ..OddsArgs::default()
        };
        assert_eq!(run(args.clone()).unwrap(), run(args).unwrap());
    }

    #[test]
    fn overlapping_cards_are_rejected() {
        let err = run(OddsArgs {
            hero: "AcAd".into(),
            villain: Some("AcKd".into()),
            ..OddsArgs::default()
        })
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
