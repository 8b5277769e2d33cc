use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::{Action, GameState, Move, Street};

/// Forced bets posted before the preflop deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blinds {
    pub small: u32,
    pub big: u32,
}

/// Highest supported blind level.
pub const MAX_LEVEL: u8 = 20;

/// Hands played at one blind level before a session moves to the next.
pub const HANDS_PER_LEVEL: u32 = 15;

/// Blind level for the `hand`-th hand (1-based) of a session that started at `start`.
///
/// ```
/// use holdem_engine::rules::level_for_hand;
///
/// assert_eq!(level_for_hand(1, 15), 1);
/// assert_eq!(level_for_hand(1, 16), 2);
/// assert_eq!(level_for_hand(20, 100), 20);
/// ```
pub fn level_for_hand(start: u8, hand: u32) -> u8 {
    let steps = hand.saturating_sub(1) / HANDS_PER_LEVEL;
    let steps = u8::try_from(steps).unwrap_or(u8::MAX);
    start.saturating_add(steps).clamp(1, MAX_LEVEL)
}

/// Blind structure by level: 1/2 at level 1, doubling each level, capped at [`MAX_LEVEL`].
///
/// ```
/// use holdem_engine::rules::{blinds_for_level, Blinds};
///
/// assert_eq!(blinds_for_level(1), Blinds { small: 1, big: 2 });
/// assert_eq!(blinds_for_level(3), Blinds { small: 4, big: 8 });
/// ```
pub fn blinds_for_level(level: u8) -> Blinds {
    let level = level.clamp(1, MAX_LEVEL);
    let small = 1u32 << (level - 1);
    Blinds {
        small,
        big: small * 2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips added to match the current bet
    Call(u32),
    /// Opening bet on a street with no bet yet
    Bet { to: u32, added: u32 },
    Raise { to: u32, added: u32 },
    /// Any action that commits the rest of the stack
    AllIn { to: u32, added: u32 },
}

impl ValidatedAction {
    /// Chips this action moves from stack to pot.
    pub fn added(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(added) => added,
            ValidatedAction::Bet { added, .. }
            | ValidatedAction::Raise { added, .. }
            | ValidatedAction::AllIn { added, .. } => added,
        }
    }
}

/// Checks a proposed action against the current state of a hand.
///
/// This is a pure function of `(state, action)`; an `Err` carries the reason
/// the action is illegal and callers may simply offer another action.
///
/// A bet or raise names the player's new total for the street. It is legal
/// when it reaches the current bet plus the minimum raise increment (the
/// larger of the big blind and the last full raise), or when it puts the
/// player all-in above the current bet. An all-in short of a full raise does
/// not reopen raising for players who already acted.
///
/// # Examples
///
/// ```
/// use holdem_engine::game::{Action, GameState};
/// use holdem_engine::rules::{validate_action, Blinds, ValidatedAction};
/// use holdem_engine::errors::GameError;
///
/// let state = GameState::new(vec![200, 200, 200], Blinds { small: 1, big: 2 }).unwrap();
///
/// // Seat 2 is first to act and owes the big blind.
/// let verdict = validate_action(&state, &Action::check_call(2));
/// assert_eq!(verdict, Ok(ValidatedAction::Call(2)));
///
/// // A raise must reach at least twice the big blind.
/// let verdict = validate_action(&state, &Action::bet_raise(2, 3));
/// assert!(matches!(verdict, Err(GameError::InvalidBetAmount { minimum: 4, .. })));
///
/// // Seat 0 must wait its turn.
/// let verdict = validate_action(&state, &Action::fold(0));
/// assert!(matches!(verdict, Err(GameError::NotPlayersTurn { expected: 2, actual: 0 })));
/// ```
pub fn validate_action(state: &GameState, action: &Action) -> Result<ValidatedAction, GameError> {
    let p = action.player;
    if state.street() == Street::Over {
        return Err(GameError::HandAlreadyComplete);
    }
    if p >= state.num_players() {
        return Err(GameError::UnknownPlayer(p));
    }
    if state.is_folded(p) {
        return Err(GameError::PlayerAlreadyFolded);
    }
    let expected = state.current_player().ok_or(GameError::HandAlreadyComplete)?;
    if expected != p {
        if state.is_all_in(p) {
            return Err(GameError::PlayerAllIn);
        }
        return Err(GameError::NotPlayersTurn {
            expected,
            actual: p,
        });
    }

    let stack = state.stacks()[p];
    let committed = state.street_bets()[p];
    let to_call = state.to_call(p);

    match action.mv {
        Move::Fold => Ok(ValidatedAction::Fold),
        Move::CheckCall => {
            if to_call == 0 {
                return Ok(ValidatedAction::Check);
            }
            if stack == 0 {
                return Err(GameError::InsufficientChips {
                    needed: to_call,
                    stack,
                });
            }
            if stack <= to_call {
                Ok(ValidatedAction::AllIn {
                    to: committed + stack,
                    added: stack,
                })
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        Move::BetRaise => {
            let to = action.amount;
            if !state.may_raise(p) {
                return Err(GameError::RaiseNotReopened);
            }
            if state.opponents_able_to_act(p) == 0 {
                return Err(GameError::NoOpponentToRaise);
            }
            let max_to = state.max_raise_to(p);
            if max_to <= state.current_bet() {
                // Cannot even cover the call; only call or fold remain.
                return Err(GameError::InsufficientChips {
                    needed: state.current_bet() + 1 - committed,
                    stack,
                });
            }
            if to > max_to {
                return Err(GameError::InsufficientChips {
                    needed: to - committed,
                    stack,
                });
            }
            let added = to.saturating_sub(committed);
            if to == max_to && to > state.current_bet() {
                return Ok(ValidatedAction::AllIn { to, added });
            }
            let minimum = state.min_raise_to();
            if to < minimum {
                return Err(GameError::InvalidBetAmount {
                    amount: to,
                    minimum: minimum.min(max_to),
                });
            }
            if state.current_bet() == 0 {
                Ok(ValidatedAction::Bet { to, added })
            } else {
                Ok(ValidatedAction::Raise { to, added })
            }
        }
    }
}
