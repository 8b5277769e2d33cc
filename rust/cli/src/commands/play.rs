//! # Play Command
//!
//! Plays a session at one table. Seat 0 is either you, answering prompts on
//! stdin, or another baseline policy; every other seat is a baseline policy.
//! Stacks carry over between hands and the button moves one seat each hand.
//! Blinds go up one level every
//! [`HANDS_PER_LEVEL`](holdem_engine::rules::HANDS_PER_LEVEL) hands.
//! The session ends early once any seat runs out of chips.

use crate::cli::Vs;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_action, format_results};
use holdem_ai::human::HumanPolicy;
use holdem_ai::simulate::play_hand;
use holdem_ai::{AnyPolicy, PolicyKind, create_policy};
use holdem_engine::cards::{MAX_PLAYERS, MIN_PLAYERS};
use holdem_engine::engine::Engine;
use holdem_engine::logger::HandRecord;
use holdem_engine::rules::level_for_hand;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayArgs {
    pub vs: Vs,
    pub hands: Option<u32>,
    pub players: Option<usize>,
    pub seed: Option<u64>,
    pub level: Option<u8>,
}

/// Handle the play command.
///
/// `input` feeds the human seat; it is ignored when `vs` is [`Vs::Ai`].
/// Prompts for the human seat go to stderr.
pub fn handle_play_command(
    args: &PlayArgs,
    cfg: &Config,
    input: Box<dyn BufRead + Send>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let hands = args.hands.unwrap_or(1);
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let players = args.players.unwrap_or(cfg.players);
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
        return Err(CliError::InvalidInput(format!(
            "players must be between {} and {}",
            MIN_PLAYERS, MAX_PLAYERS
        )));
    }
    let level = args.level.unwrap_or(cfg.level);
    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);

    writeln!(
        out,
        "play: vs={} hands={} players={} seed={}",
        args.vs.as_str(),
        hands,
        players,
        seed
    )?;
    writeln!(out, "Level: {}", level)?;

    let mut eng = Engine::new(Some(seed), level, vec![cfg.starting_stack; players])
        .map_err(|e| CliError::Engine(e.to_string()))?;
    let mut policies = seat_policies(args.vs, players, seed, input);

    let mut played = 0u32;
    for i in 1..=hands {
        if let Some(seat) = eng.stacks().iter().position(|&s| s == 0) {
            writeln!(out, "Seat {} is out of chips, session over", seat)?;
            break;
        }
        let cur_level = level_for_hand(level, i);
        if cur_level != eng.level() {
            writeln!(out, "Level: {}", cur_level)?;
            eng.set_level(cur_level);
        }
        let (deal, state) = eng.deal_hand()?;
        let blinds = eng.blinds();
        writeln!(
            out,
            "Hand {} (button {}, blinds {}/{})",
            i,
            eng.button(),
            blinds.small,
            blinds.big
        )?;
        match args.vs {
            Vs::Human => writeln!(out, "Your cards: {}", deal.hole_cards()[0])?,
            Vs::Ai => {
                for (seat, hole) in deal.hole_cards().iter().enumerate() {
                    writeln!(out, "Seat {}: {}", seat, hole)?;
                }
            }
        }

        let outcome = play_hand(&mut policies, state, &deal)?;
        for rec in outcome.state.history() {
            writeln!(out, "{}", format_action(rec))?;
        }
        let record = HandRecord::from_hand(
            format!("hand-{}", i),
            Some(seed),
            &outcome.state,
            &deal,
            &outcome.results,
        );
        let board: Vec<String> = record.board.iter().map(|c| c.to_string()).collect();
        writeln!(
            out,
            "Board: {}",
            if board.is_empty() { "-".to_string() } else { board.join(" ") }
        )?;
        for line in format_results(&outcome.results) {
            writeln!(out, "{}", line)?;
        }
        if let Some(result) = &record.result {
            writeln!(out, "Result: {}", result)?;
        }
        eng.settle(&outcome.results)?;
        writeln!(out, "Stacks: {:?}", eng.stacks())?;
        played += 1;
    }

    writeln!(out, "Hands played: {}", played)?;
    Ok(())
}

fn seat_policies(
    vs: Vs,
    players: usize,
    seed: u64,
    input: Box<dyn BufRead + Send>,
) -> Vec<AnyPolicy> {
    let mut policies = Vec::with_capacity(players);
    policies.push(match vs {
        Vs::Human => AnyPolicy::Human(HumanPolicy::new(input, Box::new(std::io::stderr()))),
        Vs::Ai => create_policy(PolicyKind::Baseline, seed),
    });
    for seat in 1..players {
        policies.push(create_policy(
            PolicyKind::Baseline,
            seed.wrapping_add(seat as u64),
        ));
    }
    policies
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::rules::{HANDS_PER_LEVEL, blinds_for_level};
    use std::io::Cursor;

    fn args(vs: Vs, hands: u32) -> PlayArgs {
        PlayArgs {
            vs,
            hands: Some(hands),
            players: None,
            seed: Some(42),
            level: None,
        }
    }

    fn play(args: &PlayArgs, input: &str) -> Result<String, CliError> {
        let mut out = Vec::new();
        let input = Box::new(Cursor::new(input.as_bytes().to_vec()));
        handle_play_command(args, &Config::default(), input, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn human_fold_gives_up_the_small_blind() {
        // Heads-up the button is seat 0 and posts the small blind.
        let output = play(&args(Vs::Human, 1), "fold\n").unwrap();
        assert!(output.contains("play: vs=human hands=1 players=2 seed=42"));
        assert!(output.contains("preflop seat 0 folds"));
        assert!(output.contains("Rewards: -1 +1"));
        assert!(output.contains("Result: seat 1 wins 3 uncontested"));
        assert!(output.contains("Stacks: [199, 201]"));
    }

    #[test]
    fn ai_session_conserves_chips() {
        let mut a = args(Vs::Ai, 5);
        a.players = Some(4);
        let output = play(&a, "").unwrap();
        let last_stacks = output
            .lines()
            .filter(|l| l.starts_with("Stacks: "))
            .last()
            .unwrap();
        let stacks: Vec<u32> = last_stacks
            .trim_start_matches("Stacks: [")
            .trim_end_matches(']')
            .split(", ")
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(stacks.iter().sum::<u32>(), 800);
        assert!(output.contains("Hands played: "));
    }

    #[test]
    fn same_seed_same_session() {
        let a = args(Vs::Ai, 3);
        assert_eq!(play(&a, "").unwrap(), play(&a, "").unwrap());
    }

    #[test]
    fn blinds_rise_after_fifteen_hands() {
        let mut a = args(Vs::Ai, HANDS_PER_LEVEL + 1);
        a.level = Some(3);
        let cfg = Config {
            starting_stack: 1_000_000,
            ..Config::default()
        };
        let mut out = Vec::new();
        let input = Box::new(Cursor::new(Vec::new()));
        handle_play_command(&a, &cfg, input, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        let mut level = 0;
        let mut hands = 0;
        for line in output.lines() {
            if let Some(l) = line.strip_prefix("Level: ") {
                level = l.parse::<u8>().unwrap();
            } else if line.starts_with("Hand ") {
                hands += 1;
                assert_eq!(level, level_for_hand(3, hands));
                let b = blinds_for_level(level);
                assert!(line.ends_with(&format!("blinds {}/{})", b.small, b.big)));
            }
        }
        assert!(hands >= 1);
        if hands > HANDS_PER_LEVEL {
            assert_eq!(level, 4);
        }
    }

    #[test]
    fn level_stays_capped_at_the_top() {
        let mut a = args(Vs::Ai, HANDS_PER_LEVEL + 1);
        a.level = Some(20);
        let cfg = Config {
            starting_stack: u32::MAX / 4,
            ..Config::default()
        };
        let mut out = Vec::new();
        let input = Box::new(Cursor::new(Vec::new()));
        handle_play_command(&a, &cfg, input, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.lines().filter(|l| l.starts_with("Level: ")).count(), 1);
    }

    #[test]
    fn zero_hands_is_invalid() {
        assert!(matches!(
            play(&args(Vs::Ai, 0), ""),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn closed_input_still_finishes_the_session() {
        let output = play(&args(Vs::Human, 2), "").unwrap();
        assert!(output.contains("Hands played: 2"));
    }
}
