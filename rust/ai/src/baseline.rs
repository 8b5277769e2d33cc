//! Baseline policy for self-play and as a default opponent.
//!
//! Preflop it rates the hole cards on a 0-10 chart. Postflop it estimates
//! equity against random hands by simulation and compares it with the price
//! of calling. A seeded ChaCha20 stream drives the simulations and the
//! occasional bluff, so a given seed always plays the same way.

use holdem_engine::cards::{Board, HoleCards};
use holdem_engine::game::{Action, GameView, Street};
use holdem_engine::odds::simulate_odds;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::Policy;

/// Trials per postflop equity estimate.
const EQUITY_TRIALS: usize = 400;
/// Chance of betting a weak hand when checked to.
const BLUFF_FREQUENCY: f64 = 0.1;

/// Rule-based policy: a preflop chart, then equity against pot odds.
///
/// # Example
///
/// ```rust
/// use holdem_ai::baseline::BaselinePolicy;
/// use holdem_ai::Policy;
/// use holdem_engine::cards::{Board, HoleCards};
/// use holdem_engine::game::GameState;
/// use holdem_engine::rules::Blinds;
///
/// let mut ai = BaselinePolicy::new(42);
/// assert_eq!(ai.name(), "Baseline");
///
/// let state = GameState::new(vec![100, 100], Blinds { small: 1, big: 2 }).unwrap();
/// let hole: HoleCards = "AsAh".parse().unwrap();
/// let action = ai.select_action(0, &state.view(), &hole, &Board::empty());
/// assert!(state.validate(&action).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BaselinePolicy {
    rng: ChaCha20Rng,
}

impl BaselinePolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Preflop hand strength on a scale of 0-10.
    ///
    /// - 9-10: Premium hands (AA, KK, QQ, JJ, AKs)
    /// - 7-8: Strong hands (TT-99, AK, AQ, KQs)
    /// - 5-6: Medium hands (88-77, AJ, KQ, suited broadways)
    /// - 3-4: Marginal hands (66-22, Ax, suited connectors)
    /// - 0-2: Weak hands (offsuit low cards)
    pub fn preflop_strength(hole: &HoleCards) -> u8 {
        let high = hole.high().rank.value();
        let low = hole.low().rank.value();
        let suited = hole.is_suited();
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if hole.is_pair() {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            _ => {
                if suited && high - low <= 2 {
                    if high >= 9 { 5 } else { 4 }
                } else if high >= 11 && low >= 9 {
                    4
                } else {
                    2
                }
            }
        }
    }

    /// Share of the pot the call would buy: `to_call / (pot + to_call)`.
    pub fn pot_odds(pot: u32, to_call: u32) -> f64 {
        if to_call == 0 {
            return 0.0;
        }
        f64::from(to_call) / f64::from(pot + to_call)
    }

    /// Equity against every live opponent, approximated as heads-up equity
    /// against one random hand raised to the number of opponents.
    fn postflop_equity(&mut self, hole: &HoleCards, board: &Board, opponents: usize) -> f64 {
        match simulate_odds(*hole, None, board, EQUITY_TRIALS, &mut self.rng) {
            Ok(odds) => odds.equity().powi(opponents.max(1) as i32),
            Err(_) => 0.0,
        }
    }

    /// A legal raise to roughly `fraction` of the pot on top of the call, or
    /// `None` when raising is not allowed.
    fn sized_raise(player: usize, view: &GameView<'_>, fraction: f64) -> Option<Action> {
        if !view.may_raise(player) {
            return None;
        }
        let pot_after_call = view.pot() + view.to_call(player);
        let extra = (f64::from(pot_after_call) * fraction).round() as u32;
        let to = (view.current_bet() + extra)
            .max(view.min_raise_to())
            .min(view.max_raise_to(player));
        let action = Action::bet_raise(player, to);
        view.validate(&action).ok().map(|_| action)
    }

    fn decide(&mut self, player: usize, view: &GameView<'_>, strength: f64) -> Action {
        let to_call = view.to_call(player);
        let price = Self::pot_odds(view.pot(), to_call);

        if strength >= 0.8 {
            if let Some(raise) = Self::sized_raise(player, view, 0.75) {
                return raise;
            }
            return Action::check_call(player);
        }
        if to_call == 0 {
            let bluff = self.rng.random_bool(BLUFF_FREQUENCY);
            if strength >= 0.6 || bluff {
                if let Some(bet) = Self::sized_raise(player, view, 0.5) {
                    return bet;
                }
            }
            return Action::check_call(player);
        }
        if strength >= price {
            Action::check_call(player)
        } else {
            Action::fold(player)
        }
    }
}

impl Policy for BaselinePolicy {
    fn select_action(
        &mut self,
        player: usize,
        view: &GameView<'_>,
        hole: &HoleCards,
        board: &Board,
    ) -> Action {
        let strength = if view.street() == Street::Preflop || board.is_empty() {
            f64::from(Self::preflop_strength(hole)) / 10.0
        } else {
            let opponents = view.live_players().len().saturating_sub(1);
            self.postflop_equity(hole, board, opponents)
        };
        self.decide(player, view, strength)
    }

    fn name(&self) -> &str {
        "Baseline"
    }
}
