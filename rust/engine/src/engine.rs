use tracing::{debug, info};

use crate::cards::{FullDeal, MAX_PLAYERS, MIN_PLAYERS};
use crate::deck::Deck;
use crate::errors::{EngineError, SetupError};
use crate::game::{default_button, GameState};
use crate::rules::{blinds_for_level, Blinds};
use crate::showdown::GameResults;

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// A table that plays consecutive hands: stacks persist between hands and the
/// button moves one seat clockwise after every settled hand.
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::Engine;
/// use holdem_engine::showdown::resolve;
///
/// let mut engine = Engine::new(Some(12345), 1, vec![100, 100, 100]).unwrap();
/// let (deal, mut state) = engine.deal_hand().unwrap();
/// assert_eq!(deal.board().len(), 5);
///
/// // Everyone folds to the big blind.
/// state.fold().unwrap();
/// state.fold().unwrap();
/// let results = resolve(&state, &deal).unwrap();
/// engine.settle(&results).unwrap();
/// assert_eq!(engine.stacks().iter().sum::<u32>(), 300);
/// ```
#[derive(Debug)]
pub struct Engine {
    deck: Deck,
    stacks: Vec<u32>,
    level: u8,
    button: usize,
    hands_played: u64,
}

impl Engine {
    pub fn new(seed: Option<u64>, level: u8, stacks: Vec<u32>) -> Result<Self, SetupError> {
        let n = stacks.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
            return Err(SetupError::PlayerCount(n));
        }
        let seed = seed.unwrap_or(DEFAULT_SEED);
        Ok(Self {
            deck: Deck::new_with_seed(seed),
            stacks,
            level,
            button: default_button(n),
            hands_played: 0,
        })
    }

    pub fn stacks(&self) -> &[u32] {
        &self.stacks
    }

    pub fn num_players(&self) -> usize {
        self.stacks.len()
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn set_level(&mut self, level: u8) {
        self.level = level;
    }

    pub fn blinds(&self) -> Blinds {
        blinds_for_level(self.level)
    }

    pub fn button(&self) -> usize {
        self.button
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    /// Shuffles, deals the next hand and posts its blinds.
    ///
    /// Refuses to start while any seat is bust; the caller decides whether to
    /// end the session or rebuy.
    pub fn deal_hand(&mut self) -> Result<(FullDeal, GameState), EngineError> {
        if let Some(seat) = self.stacks.iter().position(|&s| s == 0) {
            return Err(SetupError::EmptyStack { seat }.into());
        }
        let deal = self.deck.deal_full(self.num_players())?;
        let state = GameState::with_button(self.stacks.clone(), self.blinds(), self.button)?;
        debug!(
            hand = self.hands_played + 1,
            button = self.button,
            "hand dealt"
        );
        Ok((deal, state))
    }

    /// Applies a resolved hand's rewards and moves the button.
    pub fn settle(&mut self, results: &GameResults) -> Result<(), EngineError> {
        let seats = self.num_players();
        if results.rewards.len() != seats {
            return Err(EngineError::SeatMismatch {
                results: results.rewards.len(),
                seats,
            });
        }
        let mut next = Vec::with_capacity(seats);
        for (seat, (&stack, &reward)) in self.stacks.iter().zip(&results.rewards).enumerate() {
            let updated = i64::from(stack) + reward;
            let updated =
                u32::try_from(updated).map_err(|_| EngineError::NegativeStack { seat, reward })?;
            next.push(updated);
        }
        self.stacks = next;
        self.button = (self.button + 1) % seats;
        self.hands_played += 1;
        info!(hand = self.hands_played, stacks = ?self.stacks, "hand settled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showdown::resolve;

    #[test]
    fn same_seed_deals_same_cards() {
        let mut a = Engine::new(Some(5), 1, vec![50, 50]).unwrap();
        let mut b = Engine::new(Some(5), 1, vec![50, 50]).unwrap();
        assert_eq!(a.deal_hand().unwrap().0, b.deal_hand().unwrap().0);
    }

    #[test]
    fn settle_rotates_button() {
        let mut e = Engine::new(None, 1, vec![100, 100, 100]).unwrap();
        assert_eq!(e.button(), 2);
        let (deal, mut state) = e.deal_hand().unwrap();
        state.fold().unwrap();
        state.fold().unwrap();
        let results = resolve(&state, &deal).unwrap();
        e.settle(&results).unwrap();
        assert_eq!(e.stacks(), &[99, 101, 100]);
        assert_eq!(e.button(), 0);
        assert_eq!(e.hands_played(), 1);
    }

    #[test]
    fn bust_seat_blocks_next_hand() {
        let mut e = Engine::new(Some(1), 1, vec![0, 100]).unwrap();
        assert_eq!(
            e.deal_hand().unwrap_err(),
            EngineError::Setup(SetupError::EmptyStack { seat: 0 })
        );
    }

    #[test]
    fn rejects_single_seat_table() {
        assert_eq!(
            Engine::new(None, 1, vec![100]).unwrap_err(),
            SetupError::PlayerCount(1)
        );
    }
}
