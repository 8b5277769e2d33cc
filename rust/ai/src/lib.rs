//! # holdem-ai: Policies and Self-Play
//!
//! Decision-makers for seats at a Hold'em table and the driver that plays
//! hands between them.
//!
//! ## Core Components
//!
//! - [`Policy`] - Trait every decision-maker implements
//! - [`AnyPolicy`] - Closed set of the policies shipped here
//! - [`baseline`] - Rule-based policy from a preflop chart and postflop equity
//! - [`human`] - Reads decisions from a line-based input
//! - [`scripted`] - Replays a fixed sequence of moves
//! - [`simulate`] - Drives hands to completion, alone or in parallel batches
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::simulate::play_hand;
//! use holdem_ai::{create_policy, PolicyKind};
//! use holdem_engine::engine::Engine;
//!
//! let mut engine = Engine::new(Some(42), 1, vec![100, 100]).unwrap();
//! let (deal, state) = engine.deal_hand().unwrap();
//! let mut policies = vec![
//!     create_policy(PolicyKind::Baseline, 1),
//!     create_policy(PolicyKind::Baseline, 2),
//! ];
//! let outcome = play_hand(&mut policies, state, &deal).unwrap();
//! assert_eq!(outcome.results.rewards.iter().sum::<i64>(), 0);
//! ```

use std::str::FromStr;

use holdem_engine::cards::{Board, HoleCards};
use holdem_engine::errors::{DealError, GameError, SetupError, ShowdownError};
use holdem_engine::game::{Action, GameView};
use thiserror::Error;

pub mod baseline;
pub mod human;
pub mod scripted;
pub mod simulate;

use baseline::BaselinePolicy;
use human::HumanPolicy;
use scripted::ScriptedPolicy;

/// A decision-maker for one seat.
///
/// `select_action` is called once per turn with a read-only view of the hand.
/// The returned action should be legal, but the driver validates it again and
/// never trusts a policy.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_ai::Policy;
/// use holdem_engine::cards::{Board, HoleCards};
/// use holdem_engine::game::{Action, GameView};
///
/// struct AlwaysCall;
///
/// impl Policy for AlwaysCall {
///     fn select_action(
///         &mut self,
///         player: usize,
///         _view: &GameView<'_>,
///         _hole: &HoleCards,
///         _board: &Board,
///     ) -> Action {
///         Action::check_call(player)
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysCall"
///     }
/// }
/// ```
pub trait Policy {
    /// Chooses an action for `player`, who is the player to act in `view`.
    /// `board` holds only the community cards visible on the current street.
    fn select_action(
        &mut self,
        player: usize,
        view: &GameView<'_>,
        hole: &HoleCards,
        board: &Board,
    ) -> Action;

    fn name(&self) -> &str;
}

/// The policies this crate provides.
pub enum AnyPolicy {
    Human(HumanPolicy),
    Scripted(ScriptedPolicy),
    Baseline(BaselinePolicy),
}

impl Policy for AnyPolicy {
    fn select_action(
        &mut self,
        player: usize,
        view: &GameView<'_>,
        hole: &HoleCards,
        board: &Board,
    ) -> Action {
        match self {
            AnyPolicy::Human(p) => p.select_action(player, view, hole, board),
            AnyPolicy::Scripted(p) => p.select_action(player, view, hole, board),
            AnyPolicy::Baseline(p) => p.select_action(player, view, hole, board),
        }
    }

    fn name(&self) -> &str {
        match self {
            AnyPolicy::Human(p) => p.name(),
            AnyPolicy::Scripted(p) => p.name(),
            AnyPolicy::Baseline(p) => p.name(),
        }
    }
}

impl std::fmt::Debug for AnyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AnyPolicy").field(&self.name()).finish()
    }
}

/// Policy variants that can be built from a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// Reads from stdin, writes prompts to stderr
    Human,
    /// Checks when free, folds otherwise
    Passive,
    Baseline,
}

impl FromStr for PolicyKind {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(PolicyKind::Human),
            "passive" | "scripted" => Ok(PolicyKind::Passive),
            "baseline" => Ok(PolicyKind::Baseline),
            other => Err(AiError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Builds a policy. `seed` drives any randomness the policy uses.
///
/// # Example
///
/// ```rust
/// use holdem_ai::{create_policy, Policy, PolicyKind};
///
/// let ai = create_policy(PolicyKind::Baseline, 7);
/// assert_eq!(ai.name(), "Baseline");
/// ```
pub fn create_policy(kind: PolicyKind, seed: u64) -> AnyPolicy {
    match kind {
        PolicyKind::Human => AnyPolicy::Human(HumanPolicy::stdio()),
        PolicyKind::Passive => AnyPolicy::Scripted(ScriptedPolicy::new(Vec::new())),
        PolicyKind::Baseline => AnyPolicy::Baseline(BaselinePolicy::new(seed)),
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),
    #[error("{policies} policies for {seats} seats")]
    PolicyCount { policies: usize, seats: usize },
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Deal(#[from] DealError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Showdown(#[from] ShowdownError),
    #[error("Invalid batch: {0}")]
    InvalidBatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_kinds_parse_case_insensitively() {
        assert_eq!("Baseline".parse::<PolicyKind>(), Ok(PolicyKind::Baseline));
        assert_eq!("scripted".parse::<PolicyKind>(), Ok(PolicyKind::Passive));
        assert_eq!(
            "gto".parse::<PolicyKind>(),
            Err(AiError::UnknownPolicy("gto".to_string()))
        );
    }

    #[test]
    fn factory_names() {
        assert_eq!(create_policy(PolicyKind::Passive, 0).name(), "Scripted");
        assert_eq!(create_policy(PolicyKind::Baseline, 0).name(), "Baseline");
    }
}
