//! Settles a finished hand: uncontested wins, showdown ranking, side pots and
//! per-seat net rewards.
//!
//! Split pots are divided evenly among the tied winners. Chips that do not
//! divide evenly are handed out one at a time to the tied winners in seat order
//! starting from the first seat left of the button, the same order in which
//! players act after the flop.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cards::{Card, FullDeal};
use crate::errors::ShowdownError;
use crate::game::GameState;
use crate::hand::{best_hand, HandStrength};
use crate::pot::PotManager;

/// One pot layer and who took it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub amount: u32,
    pub eligible: Vec<usize>,
    pub winners: Vec<usize>,
}

/// A live player's made hand at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownEntry {
    pub player: usize,
    pub strength: HandStrength,
    pub best_five: [Card; 5],
}

/// Outcome of one hand. Built once by [`resolve`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResults {
    /// Net chip change per seat: received minus contributed
    pub rewards: Vec<i64>,
    /// Chips received per seat, uncalled returns included
    pub winnings: Vec<u32>,
    /// Main pot first, then side pots
    pub pots: Vec<PotAward>,
    /// Chips returned to a seat because nobody matched them
    pub uncalled: Option<(usize, u32)>,
    /// Live hands ranked best first; `None` when the hand ended uncontested
    pub showdown: Option<Vec<ShowdownEntry>>,
}

impl GameResults {
    /// Seats that won chips from at least one pot layer.
    pub fn winners(&self) -> Vec<usize> {
        let mut w: Vec<usize> = self.pots.iter().flat_map(|p| p.winners.iter().copied()).collect();
        w.sort_unstable();
        w.dedup();
        w
    }
}

/// Resolves a finished hand against its deal.
pub fn resolve(state: &GameState, deal: &FullDeal) -> Result<GameResults, ShowdownError> {
    if !state.is_over() {
        return Err(ShowdownError::HandInProgress);
    }
    let n = state.num_players();
    if deal.num_players() != n {
        return Err(ShowdownError::PlayerCountMismatch {
            deal: deal.num_players(),
            game: n,
        });
    }
    let contributions = state.contributions();
    let live = state.live_players();
    let mut winnings = vec![0u32; n];

    let (pots, uncalled, showdown) = if let [winner] = live[..] {
        let amount = state.pot();
        winnings[winner] = amount;
        let award = PotAward {
            amount,
            eligible: vec![winner],
            winners: vec![winner],
        };
        (vec![award], None, None)
    } else {
        let board = deal.board().cards();
        let mut entries: Vec<ShowdownEntry> = live
            .iter()
            .map(|&player| {
                let mut cards = deal.hole_cards()[player].cards().to_vec();
                cards.extend_from_slice(&board);
                let (strength, best_five) = best_hand(&cards);
                ShowdownEntry {
                    player,
                    strength,
                    best_five,
                }
            })
            .collect();

        let folded: Vec<bool> = (0..n).map(|p| state.is_folded(p)).collect();
        let manager = PotManager::new(contributions, &folded);
        let strength_of = |p: usize| {
            entries
                .iter()
                .find(|e| e.player == p)
                .map(|e| e.strength)
        };

        let mut awards = Vec::with_capacity(manager.pots().len());
        for pot in manager.pots() {
            let best = pot.eligible.iter().filter_map(|&p| strength_of(p)).max();
            let winners: Vec<usize> = pot
                .eligible
                .iter()
                .copied()
                .filter(|&p| best.is_some() && strength_of(p) == best)
                .collect();
            split(pot.amount, &winners, state.button(), n, &mut winnings);
            awards.push(PotAward {
                amount: pot.amount,
                eligible: pot.eligible.clone(),
                winners,
            });
        }
        if let Some((seat, chips)) = manager.uncalled() {
            winnings[seat] += chips;
        }

        entries.sort_by(|a, b| b.strength.cmp(&a.strength).then(a.player.cmp(&b.player)));
        (awards, manager.uncalled(), Some(entries))
    };

    let rewards: Vec<i64> = (0..n)
        .map(|p| i64::from(winnings[p]) - i64::from(contributions[p]))
        .collect();
    info!(
        pot = state.pot(),
        showdown = showdown.is_some(),
        ?rewards,
        "hand resolved"
    );
    Ok(GameResults {
        rewards,
        winnings,
        pots,
        uncalled,
        showdown,
    })
}

/// Splits `amount` evenly; odd chips go clockwise from the seat left of the button.
fn split(amount: u32, winners: &[usize], button: usize, n: usize, winnings: &mut [u32]) {
    if winners.is_empty() {
        return;
    }
    let share = amount / winners.len() as u32;
    let mut remainder = amount % winners.len() as u32;
    for &w in winners {
        winnings[w] += share;
    }
    let order = (1..=n).map(|i| (button + i) % n);
    for seat in order {
        if remainder == 0 {
            break;
        }
        if winners.contains(&seat) {
            winnings[seat] += 1;
            remainder -= 1;
        }
    }
}
