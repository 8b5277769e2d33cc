use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Board, Card, FullDeal, HoleCards};
use crate::errors::DealError;

/// A 52-card deck driven by a seeded ChaCha20 stream, so the same seed
/// always produces the same sequence of shuffles.
///
/// # Examples
///
/// ```
/// use holdem_engine::deck::Deck;
///
/// let mut a = Deck::new_with_seed(42);
/// let mut b = Deck::new_with_seed(42);
/// a.shuffle();
/// b.shuffle();
/// assert_eq!(a.deal_card(), b.deal_card());
/// ```
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Shuffles and deals a complete hand: two passes of hole cards, then
    /// flop, turn and river, each preceded by a burn.
    pub fn deal_full(&mut self, num_players: usize) -> Result<FullDeal, DealError> {
        self.shuffle();
        let mut first = Vec::with_capacity(num_players);
        for _ in 0..num_players {
            first.push(self.next()?);
        }
        let mut holes = Vec::with_capacity(num_players);
        for &a in &first {
            let b = self.next()?;
            holes.push(HoleCards::new(a, b).map_err(|_| DealError::DuplicateCard(a))?);
        }
        self.burn_card();
        let flop = [self.next()?, self.next()?, self.next()?];
        self.burn_card();
        let turn = self.next()?;
        self.burn_card();
        let river = self.next()?;
        FullDeal::new(holes, Board::complete(flop, turn, river))
    }

    fn next(&mut self) -> Result<Card, DealError> {
        self.deal_card().ok_or(DealError::DeckExhausted)
    }

    /// Every card of a fresh deck except `known`, in deck order.
    pub fn without(known: &[Card]) -> Vec<Card> {
        full_deck()
            .into_iter()
            .filter(|c| !known.contains(c))
            .collect()
    }
}
