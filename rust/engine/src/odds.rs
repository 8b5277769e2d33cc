//! Equity estimation for a hero hand against a fixed or random opponent.
//!
//! When the unknown cards admit at most [`EXHAUSTIVE_LIMIT`] outcomes every
//! outcome is evaluated once and the trial count is ignored. Otherwise each
//! trial samples the opponent hand (if not fixed) and the rest of the board
//! without replacement from the cards nobody holds.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cards::{Board, Card, HoleCards};
use crate::deck::Deck;
use crate::errors::{DealError, OddsError};
use crate::hand::evaluate_hand;

/// Enumerate instead of sampling at or below this many outcomes.
pub const EXHAUSTIVE_LIMIT: u64 = 2_000;

/// Trials per independently seeded chunk in [`simulate_odds_parallel`].
const CHUNK_TRIALS: usize = 1_000;

/// Win/tie/loss counts from the hero's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Odds {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
    pub trials: u64,
}

impl Odds {
    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn tie_rate(&self) -> f64 {
        self.rate(self.ties)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    /// Share of the pot the hero expects: wins plus half of ties.
    pub fn equity(&self) -> f64 {
        self.win_rate() + self.tie_rate() / 2.0
    }

    pub fn merge(self, other: Odds) -> Odds {
        Odds {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            losses: self.losses + other.losses,
            trials: self.trials + other.trials,
        }
    }

    fn rate(&self, count: u64) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            count as f64 / self.trials as f64
        }
    }

    fn record(&mut self, hero: &[Card; 7], villain: &[Card; 7]) {
        let h = evaluate_hand(hero);
        let v = evaluate_hand(villain);
        match h.cmp(&v) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Equal => self.ties += 1,
            std::cmp::Ordering::Less => self.losses += 1,
        }
        self.trials += 1;
    }
}

/// Cards in play and what remains to be dealt.
struct Setup {
    hero: HoleCards,
    opponent: Option<HoleCards>,
    board: Vec<Card>,
    rest: Vec<Card>,
}

impl Setup {
    fn new(hero: HoleCards, opponent: Option<HoleCards>, board: &Board) -> Result<Self, DealError> {
        let mut known: Vec<Card> = hero.cards().to_vec();
        if let Some(opp) = opponent {
            known.extend_from_slice(&opp.cards());
        }
        known.extend(board.cards());
        for (i, c) in known.iter().enumerate() {
            if known[..i].contains(c) {
                return Err(DealError::DuplicateCard(*c));
            }
        }
        Ok(Self {
            hero,
            opponent,
            board: board.cards(),
            rest: Deck::without(&known),
        })
    }

    fn missing(&self) -> usize {
        5 - self.board.len()
    }

    /// Distinct runouts times distinct opponent hands.
    fn outcomes(&self) -> u64 {
        let r = self.rest.len() as u64;
        let m = self.missing() as u64;
        let runouts = choose(r, m);
        match self.opponent {
            Some(_) => runouts,
            None => runouts.saturating_mul(choose(r - m, 2)),
        }
    }

    /// Scores one outcome given the drawn board cards and opponent hand.
    fn score(&self, runout: &[Card], villain: [Card; 2], odds: &mut Odds) {
        let mut hero = [self.hero.high(); 7];
        let mut opp = [villain[0]; 7];
        hero[..2].copy_from_slice(&self.hero.cards());
        opp[..2].copy_from_slice(&villain);
        for (i, &c) in self.board.iter().chain(runout).enumerate() {
            hero[2 + i] = c;
            opp[2 + i] = c;
        }
        odds.record(&hero, &opp);
    }

    fn enumerate(&self) -> Odds {
        let mut odds = Odds::default();
        let missing = self.missing();
        for_each_combination(self.rest.len(), missing, &mut |idx| {
            let runout: Vec<Card> = idx.iter().map(|&i| self.rest[i]).collect();
            match self.opponent {
                Some(opp) => self.score(&runout, opp.cards(), &mut odds),
                None => {
                    let pool: Vec<Card> = self
                        .rest
                        .iter()
                        .copied()
                        .filter(|c| !runout.contains(c))
                        .collect();
                    for_each_combination(pool.len(), 2, &mut |pair| {
                        self.score(&runout, [pool[pair[0]], pool[pair[1]]], &mut odds);
                    });
                }
            }
        });
        odds
    }

    fn sample<R: Rng + ?Sized>(&self, trials: usize, rng: &mut R) -> Odds {
        let mut odds = Odds::default();
        let missing = self.missing();
        let draw = missing + if self.opponent.is_some() { 0 } else { 2 };
        let mut pool = self.rest.clone();
        for _ in 0..trials {
            let (drawn, _) = pool.partial_shuffle(rng, draw);
            let (runout, extra) = drawn.split_at(missing);
            let villain = match self.opponent {
                Some(opp) => opp.cards(),
                None => [extra[0], extra[1]],
            };
            self.score(runout, villain, &mut odds);
        }
        odds
    }
}

/// Estimates the hero's win, tie and loss rates.
///
/// `opponent` of `None` means a uniformly random hand from the unseen cards.
/// Results are exact, and identical for any `num_trials`, whenever the
/// unknown outcomes are few enough to enumerate; a complete board against a
/// fixed opponent is a single evaluation.
pub fn simulate_odds<R: Rng + ?Sized>(
    hero: HoleCards,
    opponent: Option<HoleCards>,
    board: &Board,
    num_trials: usize,
    rng: &mut R,
) -> Result<Odds, OddsError> {
    let setup = Setup::new(hero, opponent, board)?;
    let outcomes = setup.outcomes();
    if outcomes <= EXHAUSTIVE_LIMIT {
        trace!(outcomes, "odds: exhaustive enumeration");
        return Ok(setup.enumerate());
    }
    if num_trials == 0 {
        return Err(OddsError::NoTrials);
    }
    trace!(outcomes, num_trials, "odds: monte carlo");
    Ok(setup.sample(num_trials, rng))
}

/// [`simulate_odds`] with its own ChaCha20 stream seeded from `seed`.
pub fn simulate_odds_seeded(
    hero: HoleCards,
    opponent: Option<HoleCards>,
    board: &Board,
    num_trials: usize,
    seed: u64,
) -> Result<Odds, OddsError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    simulate_odds(hero, opponent, board, num_trials, &mut rng)
}

/// Equity of `hero` against one random hand.
///
/// ```
/// use holdem_engine::cards::{Board, HoleCards};
/// use holdem_engine::odds::odds_vs_random_hand;
///
/// let aces: HoleCards = "AcAd".parse().unwrap();
/// let odds = odds_vs_random_hand(aces, &Board::empty(), 2_000, 7).unwrap();
/// assert!(odds.win_rate() > 0.7);
/// ```
pub fn odds_vs_random_hand(
    hero: HoleCards,
    board: &Board,
    num_trials: usize,
    seed: u64,
) -> Result<Odds, OddsError> {
    simulate_odds_seeded(hero, None, board, num_trials, seed)
}

/// Splits the trials into fixed-size chunks run on the rayon pool.
///
/// Chunk `i` is seeded with `seed + i`, so the result depends only on the
/// arguments and never on the number of worker threads.
pub fn simulate_odds_parallel(
    hero: HoleCards,
    opponent: Option<HoleCards>,
    board: &Board,
    num_trials: usize,
    seed: u64,
) -> Result<Odds, OddsError> {
    let setup = Setup::new(hero, opponent, board)?;
    if setup.outcomes() <= EXHAUSTIVE_LIMIT {
        return Ok(setup.enumerate());
    }
    if num_trials == 0 {
        return Err(OddsError::NoTrials);
    }
    let chunks = num_trials.div_ceil(CHUNK_TRIALS);
    let odds = (0..chunks)
        .into_par_iter()
        .map(|i| {
            let len = CHUNK_TRIALS.min(num_trials - i * CHUNK_TRIALS);
            let mut rng = ChaCha20Rng::seed_from_u64(seed.wrapping_add(i as u64));
            setup.sample(len, &mut rng)
        })
        .reduce(Odds::default, Odds::merge);
    trace!(chunks, trials = odds.trials, "odds: parallel monte carlo");
    Ok(odds)
}

fn choose(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u64, |acc, i| acc.saturating_mul(n - i) / (i + 1))
}

/// Calls `f` with every ascending `k`-subset of `0..n`.
fn for_each_combination(n: usize, k: usize, f: &mut dyn FnMut(&[usize])) {
    fn go(start: usize, n: usize, k: usize, idx: &mut Vec<usize>, f: &mut dyn FnMut(&[usize])) {
        if idx.len() == k {
            f(idx);
            return;
        }
        let needed = k - idx.len();
        if start + needed > n {
            return;
        }
        for i in start..=n - needed {
            idx.push(i);
            go(i + 1, n, k, idx, f);
            idx.pop();
        }
    }
    let mut idx = Vec::with_capacity(k);
    go(0, n, k, &mut idx, f);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole(s: &str) -> HoleCards {
        s.parse().unwrap()
    }

    #[test]
    fn combination_counts() {
        assert_eq!(choose(45, 2), 990);
        assert_eq!(choose(44, 1), 44);
        assert_eq!(choose(48, 5), 1_712_304);
        let mut seen = 0;
        for_each_combination(6, 3, &mut |_| seen += 1);
        assert_eq!(seen, 20);
        let mut empty = 0;
        for_each_combination(10, 0, &mut |idx| {
            assert!(idx.is_empty());
            empty += 1;
        });
        assert_eq!(empty, 1);
    }

    #[test]
    fn river_vs_fixed_hand_is_single_evaluation() {
        let board: Board = "AsAh3d7c9s".parse().unwrap();
        let odds = simulate_odds_seeded(hole("AcAd"), Some(hole("KcKs")), &board, 10, 1).unwrap();
        assert_eq!(odds, Odds { wins: 1, ties: 0, losses: 0, trials: 1 });
    }

    #[test]
    fn overlapping_cards_are_rejected() {
        let board: Board = "AcKd2h".parse().unwrap();
        let err = simulate_odds_seeded(hole("AcAd"), None, &board, 100, 1).unwrap_err();
        assert!(matches!(err, OddsError::Cards(DealError::DuplicateCard(_))));
    }

    #[test]
    fn zero_trials_is_an_error() {
        let err = simulate_odds_seeded(hole("AcAd"), None, &Board::empty(), 0, 1).unwrap_err();
        assert_eq!(err, OddsError::NoTrials);
    }

    #[test]
    fn rates_sum_to_one() {
        let odds = simulate_odds_seeded(hole("7h2c"), None, &Board::empty(), 3_000, 11).unwrap();
        let total = odds.win_rate() + odds.tie_rate() + odds.loss_rate();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(odds.trials, 3_000);
    }
}
