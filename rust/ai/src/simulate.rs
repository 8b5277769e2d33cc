//! Drives hands between policies.
//!
//! [`play_hand`] runs one hand to the end. [`run_batch`] plays many
//! independent hands on the rayon pool: every hand derives its stacks, deal,
//! button and seating from its own seed, so a batch is reproducible no matter
//! how many threads run it.

use holdem_engine::cards::{FullDeal, MAX_PLAYERS, MIN_PLAYERS};
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;
use holdem_engine::game::{Action, GameState};
use holdem_engine::logger::HandRecord;
use holdem_engine::rules::{blinds_for_level, Blinds};
use holdem_engine::showdown::{resolve, GameResults};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{create_policy, AiError, Policy, PolicyKind};

/// Starting stacks are drawn between these multiples of the big blind.
pub const MIN_STACK_BB: u32 = 20;
pub const MAX_STACK_BB: u32 = 200;

/// A finished hand and how it went.
#[derive(Debug, Clone)]
pub struct HandOutcome {
    pub state: GameState,
    pub results: GameResults,
    /// Proposals the driver rejected and replaced with check-or-fold
    pub illegal_proposals: usize,
}

/// Plays `state` to completion with `policies[seat]` deciding for each seat.
///
/// Every proposal is validated again. An illegal one is logged and replaced
/// by a check when that is free, otherwise a fold.
pub fn play_hand<P: Policy>(
    policies: &mut [P],
    mut state: GameState,
    deal: &FullDeal,
) -> Result<HandOutcome, AiError> {
    if policies.len() != state.num_players() {
        return Err(AiError::PolicyCount {
            policies: policies.len(),
            seats: state.num_players(),
        });
    }
    let mut illegal_proposals = 0;
    while let Some(player) = state.current_player() {
        let board = deal.board().visible_at(state.street());
        let hole = deal.hole_cards()[player];
        let policy = &mut policies[player];
        let proposed = policy.select_action(player, &state.view(), &hole, &board);
        let verdict = if proposed.player == player {
            state.apply(proposed).map(|_| ())
        } else {
            Err(GameError::NotPlayersTurn {
                expected: player,
                actual: proposed.player,
            })
        };
        if let Err(reason) = verdict {
            illegal_proposals += 1;
            warn!(player, policy = policy.name(), ?proposed, %reason, "illegal action replaced");
            let fallback = if state.to_call(player) == 0 {
                Action::check_call(player)
            } else {
                Action::fold(player)
            };
            state.apply(fallback)?;
        }
    }
    let results = resolve(&state, deal)?;
    Ok(HandOutcome {
        state,
        results,
        illegal_proposals,
    })
}

/// Random stacks for a table, each between [`MIN_STACK_BB`] and
/// [`MAX_STACK_BB`] big blinds.
pub fn choose_starting_stacks<R: Rng + ?Sized>(rng: &mut R, num_players: usize, blinds: Blinds) -> Vec<u32> {
    (0..num_players)
        .map(|_| rng.random_range(MIN_STACK_BB..=MAX_STACK_BB) * blinds.big)
        .collect()
}

/// Settings for [`run_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub hands: usize,
    pub seed: u64,
    pub level: u8,
    /// One entry per seat; seats are reshuffled every hand
    pub policies: Vec<PolicyKind>,
}

impl BatchConfig {
    /// `players` baseline policies.
    pub fn baseline(hands: usize, players: usize, seed: u64) -> Self {
        Self {
            hands,
            seed,
            level: 1,
            policies: vec![PolicyKind::Baseline; players],
        }
    }

    fn validate(&self) -> Result<(), AiError> {
        let n = self.policies.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
            return Err(AiError::InvalidBatch(format!("{n} players")));
        }
        if self.policies.contains(&PolicyKind::Human) {
            return Err(AiError::InvalidBatch(
                "human players cannot sit in a batch".to_string(),
            ));
        }
        Ok(())
    }
}

/// One hand from a batch, with everything needed to record it.
#[derive(Debug, Clone)]
pub struct SimulatedHand {
    pub seed: u64,
    /// Policy name per seat
    pub seating: Vec<String>,
    pub deal: FullDeal,
    pub outcome: HandOutcome,
}

impl SimulatedHand {
    pub fn record(&self, hand_id: String) -> HandRecord {
        let mut rec = HandRecord::from_hand(
            hand_id,
            Some(self.seed),
            &self.outcome.state,
            &self.deal,
            &self.outcome.results,
        );
        rec.meta = Some(serde_json::json!({ "policies": self.seating }));
        rec
    }
}

/// Plays `config.hands` independent hands in parallel, in hand order.
pub fn run_batch(config: &BatchConfig) -> Result<Vec<SimulatedHand>, AiError> {
    config.validate()?;
    (0..config.hands)
        .into_par_iter()
        .map(|i| play_seeded_hand(config, config.seed.wrapping_add(i as u64)))
        .collect()
}

fn play_seeded_hand(config: &BatchConfig, seed: u64) -> Result<SimulatedHand, AiError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let n = config.policies.len();
    let blinds = blinds_for_level(config.level);
    let stacks = choose_starting_stacks(&mut rng, n, blinds);
    let button = rng.random_range(0..n);

    let mut kinds = config.policies.clone();
    kinds.shuffle(&mut rng);
    let mut policies: Vec<_> = kinds
        .iter()
        .map(|&kind| create_policy(kind, rng.random()))
        .collect();
    let seating = policies.iter().map(|p| p.name().to_string()).collect();

    let deal = Deck::new_with_seed(seed).deal_full(n)?;
    let state = GameState::with_button(stacks, blinds, button)?;
    let outcome = play_hand(&mut policies, state, &deal)?;
    debug!(seed, rewards = ?outcome.results.rewards, "simulated hand");
    Ok(SimulatedHand {
        seed,
        seating,
        deal,
        outcome,
    })
}
