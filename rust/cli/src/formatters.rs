//! Plain-text rendering of actions, boards and results.

use holdem_engine::cards::Board;
use holdem_engine::game::{ActionRecord, Move, Street};
use holdem_engine::showdown::GameResults;

pub fn format_street(street: Street) -> &'static str {
    match street {
        Street::Preflop => "preflop",
        Street::Flop => "flop",
        Street::Turn => "turn",
        Street::River => "river",
        Street::Over => "over",
    }
}

/// One history entry, e.g. `flop  seat 2 raises to 40 (all-in)`.
pub fn format_action(rec: &ActionRecord) -> String {
    let seat = rec.action.player;
    let what = match rec.action.mv {
        Move::Fold => "folds".to_string(),
        Move::CheckCall if rec.added == 0 => "checks".to_string(),
        Move::CheckCall => format!("calls {}", rec.added),
        Move::BetRaise => format!("raises to {}", rec.action.amount),
    };
    let all_in = if rec.all_in { " (all-in)" } else { "" };
    format!("{:<7} seat {} {}{}", format_street(rec.street), seat, what, all_in)
}

pub fn format_board(board: &Board) -> String {
    if board.is_empty() {
        "-".to_string()
    } else {
        board
            .cards()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Signed chip change, `+3` / `-2` / `0`.
pub fn format_reward(reward: i64) -> String {
    if reward > 0 {
        format!("+{}", reward)
    } else {
        reward.to_string()
    }
}

/// Multi-line summary of how the pot was split.
pub fn format_results(results: &GameResults) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(entries) = &results.showdown {
        for e in entries {
            let five = e.best_five.iter().map(|c| c.to_string()).collect::<String>();
            lines.push(format!(
                "Showdown: seat {} shows {} ({})",
                e.player, five, e.strength.category
            ));
        }
    }
    for (i, pot) in results.pots.iter().enumerate() {
        let label = if i == 0 { "Main pot".to_string() } else { format!("Side pot {}", i) };
        lines.push(format!("{}: {} to seats {:?}", label, pot.amount, pot.winners));
    }
    if let Some((seat, amount)) = results.uncalled {
        lines.push(format!("Uncalled {} returned to seat {}", amount, seat));
    }
    let rewards = results
        .rewards
        .iter()
        .map(|&r| format_reward(r))
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(format!("Rewards: {}", rewards));
    lines
}
