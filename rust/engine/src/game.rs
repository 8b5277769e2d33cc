//! Per-hand betting state machine.
//!
//! A [`GameState`] is created once the blinds are posted and is mutated only
//! through [`GameState::apply`], which validates first and mutates second, so a
//! rejected action leaves the state exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{MAX_PLAYERS, MIN_PLAYERS};
use crate::errors::{GameError, SetupError};
use crate::rules::{validate_action, Blinds, ValidatedAction};

/// Betting rounds of a hand, in order. `Over` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
    /// No further betting
    Over,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Over => Street::Over,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Move {
    Fold,
    CheckCall,
    BetRaise,
}

/// A player's decision.
///
/// `amount` is the new street total for `BetRaise`. For `CheckCall` it is
/// ignored on input and set to the chips actually added once recorded.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub player: usize,
    #[serde(rename = "move")]
    pub mv: Move,
    pub amount: u32,
}

impl Action {
    pub fn fold(player: usize) -> Self {
        Self {
            player,
            mv: Move::Fold,
            amount: 0,
        }
    }

    pub fn check_call(player: usize) -> Self {
        Self {
            player,
            mv: Move::CheckCall,
            amount: 0,
        }
    }

    /// Bet or raise so that `player` has `to` chips in front of them this street.
    pub fn bet_raise(player: usize, to: u32) -> Self {
        Self {
            player,
            mv: Move::BetRaise,
            amount: to,
        }
    }
}

/// An applied action as kept in the hand history.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The betting street when this action occurred
    pub street: Street,
    /// The action with its amount normalised
    pub action: Action,
    /// Chips moved from stack to pot
    pub added: u32,
    /// Whether the action left the player with an empty stack
    pub all_in: bool,
}

/// Mutable state of a single hand, owned by one caller for the hand's duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    starting_stacks: Vec<u32>,
    stacks: Vec<u32>,
    /// Chips committed this hand, blinds included
    contributions: Vec<u32>,
    /// Chips committed on the current street
    street_bets: Vec<u32>,
    folded: Vec<bool>,
    /// Acted since the last full bet or raise
    acted: Vec<bool>,
    /// Cleared when a short all-in does not reopen raising
    may_raise: Vec<bool>,
    blinds: Blinds,
    button: usize,
    blind_posts: [(usize, u32); 2],
    street: Street,
    to_act: Option<usize>,
    current_bet: u32,
    /// Size of the last full raise, never below the big blind
    min_raise: u32,
    history: Vec<ActionRecord>,
}

impl GameState {
    /// Starts a hand with the default button, which puts the small blind in seat 0.
    pub fn new(starting_stacks: Vec<u32>, blinds: Blinds) -> Result<Self, SetupError> {
        let button = default_button(starting_stacks.len());
        Self::with_button(starting_stacks, blinds, button)
    }

    /// Starts a hand, posting blinds relative to `button`.
    ///
    /// Heads-up the button posts the small blind; otherwise the small blind
    /// sits left of the button and the big blind left of that.
    pub fn with_button(
        starting_stacks: Vec<u32>,
        blinds: Blinds,
        button: usize,
    ) -> Result<Self, SetupError> {
        let n = starting_stacks.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
            return Err(SetupError::PlayerCount(n));
        }
        if let Some(seat) = starting_stacks.iter().position(|&s| s == 0) {
            return Err(SetupError::EmptyStack { seat });
        }
        if blinds.small == 0 || blinds.big < blinds.small {
            return Err(SetupError::InvalidBlinds {
                small: blinds.small,
                big: blinds.big,
            });
        }
        if button >= n {
            return Err(SetupError::ButtonOutOfRange { button, players: n });
        }

        let (sb, bb) = blind_seats(button, n);
        let mut state = Self {
            stacks: starting_stacks.clone(),
            starting_stacks,
            contributions: vec![0; n],
            street_bets: vec![0; n],
            folded: vec![false; n],
            acted: vec![false; n],
            may_raise: vec![true; n],
            blinds,
            button,
            blind_posts: [(sb, 0), (bb, 0)],
            street: Street::Preflop,
            to_act: None,
            current_bet: 0,
            min_raise: blinds.big,
            history: Vec::new(),
        };
        let small = state.commit(sb, blinds.small);
        let big = state.commit(bb, blinds.big);
        state.blind_posts = [(sb, small), (bb, big)];
        // The price to play is the full big blind even when it was posted short.
        state.current_bet = blinds.big;
        state.advance((bb + 1) % n);
        Ok(state)
    }

    /// Checks `action` against the current state without mutating it.
    pub fn validate(&self, action: &Action) -> Result<ValidatedAction, GameError> {
        validate_action(self, action)
    }

    /// Validates and applies `action`. On `Err` nothing has changed.
    pub fn apply(&mut self, action: Action) -> Result<ActionRecord, GameError> {
        let validated = self.validate(&action)?;
        let p = action.player;
        let street = self.street;

        let (recorded, added) = match validated {
            ValidatedAction::Fold => {
                self.folded[p] = true;
                (Action::fold(p), 0)
            }
            ValidatedAction::Check => (Action::check_call(p), 0),
            ValidatedAction::Call(added) => {
                self.commit(p, added);
                (
                    Action {
                        amount: added,
                        ..Action::check_call(p)
                    },
                    added,
                )
            }
            ValidatedAction::Bet { to, added }
            | ValidatedAction::Raise { to, added }
            | ValidatedAction::AllIn { to, added } => {
                self.commit(p, added);
                self.raise_to(p, to);
                let recorded = if action.mv == Move::CheckCall {
                    Action {
                        amount: added,
                        ..Action::check_call(p)
                    }
                } else {
                    Action::bet_raise(p, to)
                };
                (recorded, added)
            }
        };
        self.acted[p] = true;

        let record = ActionRecord {
            street,
            action: recorded,
            added,
            all_in: self.stacks[p] == 0 && added > 0,
        };
        debug!(
            player = p,
            mv = ?record.action.mv,
            amount = record.action.amount,
            added,
            ?street,
            "action applied"
        );
        self.history.push(record);
        self.advance((p + 1) % self.num_players());
        Ok(record)
    }

    /// Returns the state that results from `action`, leaving `self` untouched.
    pub fn after(&self, action: Action) -> Result<Self, GameError> {
        let mut next = self.clone();
        next.apply(action)?;
        Ok(next)
    }

    /// Folds for the player to act.
    pub fn fold(&mut self) -> Result<ActionRecord, GameError> {
        let p = self.to_act.ok_or(GameError::HandAlreadyComplete)?;
        self.apply(Action::fold(p))
    }

    /// Checks, or calls whatever is owed, for the player to act.
    pub fn call(&mut self) -> Result<ActionRecord, GameError> {
        let p = self.to_act.ok_or(GameError::HandAlreadyComplete)?;
        self.apply(Action::check_call(p))
    }

    pub fn check(&mut self) -> Result<ActionRecord, GameError> {
        self.call()
    }

    /// Bets or raises to a street total of `to` for the player to act.
    pub fn bet_raise(&mut self, to: u32) -> Result<ActionRecord, GameError> {
        let p = self.to_act.ok_or(GameError::HandAlreadyComplete)?;
        self.apply(Action::bet_raise(p, to))
    }

    /// Commits the whole stack of the player to act.
    pub fn all_in(&mut self) -> Result<ActionRecord, GameError> {
        let p = self.to_act.ok_or(GameError::HandAlreadyComplete)?;
        let to = self.max_raise_to(p);
        if to <= self.current_bet {
            self.apply(Action::check_call(p))
        } else {
            self.apply(Action::bet_raise(p, to))
        }
    }

    pub fn view(&self) -> GameView<'_> {
        GameView { state: self }
    }

    pub fn num_players(&self) -> usize {
        self.stacks.len()
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn is_over(&self) -> bool {
        self.street == Street::Over
    }

    pub fn current_player(&self) -> Option<usize> {
        self.to_act
    }

    pub fn starting_stacks(&self) -> &[u32] {
        &self.starting_stacks
    }

    pub fn stacks(&self) -> &[u32] {
        &self.stacks
    }

    pub fn contributions(&self) -> &[u32] {
        &self.contributions
    }

    pub fn street_bets(&self) -> &[u32] {
        &self.street_bets
    }

    pub fn pot(&self) -> u32 {
        self.contributions.iter().sum()
    }

    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    pub fn blinds(&self) -> Blinds {
        self.blinds
    }

    pub fn button(&self) -> usize {
        self.button
    }

    /// `(seat, chips posted)` for the small then the big blind.
    pub fn blind_posts(&self) -> [(usize, u32); 2] {
        self.blind_posts
    }

    pub fn is_folded(&self, player: usize) -> bool {
        self.folded[player]
    }

    pub fn is_all_in(&self, player: usize) -> bool {
        !self.folded[player] && self.stacks[player] == 0
    }

    pub fn may_raise(&self, player: usize) -> bool {
        self.may_raise[player]
    }

    /// Highest street total any player has committed.
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }

    /// Smallest legal full raise increment.
    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }

    /// Chips `player` must add to match the current bet.
    pub fn to_call(&self, player: usize) -> u32 {
        self.current_bet.saturating_sub(self.street_bets[player])
    }

    pub fn amount_to_call(&self) -> Vec<u32> {
        (0..self.num_players()).map(|p| self.to_call(p)).collect()
    }

    /// Smallest street total that counts as a full bet or raise.
    pub fn min_raise_to(&self) -> u32 {
        self.current_bet.saturating_add(self.min_raise)
    }

    /// Street total reached by going all-in.
    pub fn max_raise_to(&self, player: usize) -> u32 {
        self.street_bets[player] + self.stacks[player]
    }

    /// Seats that have not folded.
    pub fn live_players(&self) -> Vec<usize> {
        (0..self.num_players()).filter(|&p| !self.folded[p]).collect()
    }

    /// Players other than `player` who still have chips and cards.
    pub(crate) fn opponents_able_to_act(&self, player: usize) -> usize {
        (0..self.num_players())
            .filter(|&p| p != player && self.can_act(p))
            .count()
    }

    fn can_act(&self, p: usize) -> bool {
        !self.folded[p] && self.stacks[p] > 0
    }

    fn needs_action(&self, p: usize) -> bool {
        if !self.can_act(p) {
            return false;
        }
        if self.street_bets[p] < self.current_bet {
            return true;
        }
        !self.acted[p] && self.opponents_able_to_act(p) > 0
    }

    /// Moves up to `amount` chips from stack to pot, returning what moved.
    fn commit(&mut self, p: usize, amount: u32) -> u32 {
        let added = amount.min(self.stacks[p]);
        self.stacks[p] -= added;
        self.street_bets[p] += added;
        self.contributions[p] += added;
        added
    }

    fn raise_to(&mut self, p: usize, to: u32) {
        if to <= self.current_bet {
            return;
        }
        let increment = to - self.current_bet;
        if increment >= self.min_raise {
            self.min_raise = increment;
            for q in 0..self.num_players() {
                self.acted[q] = false;
                self.may_raise[q] = true;
            }
        } else {
            // Short all-in: players who already acted may only call or fold.
            for q in 0..self.num_players() {
                if self.acted[q] {
                    self.may_raise[q] = false;
                }
            }
        }
        self.may_raise[p] = true;
        self.current_bet = to;
    }

    fn seek(&self, from: usize) -> Option<usize> {
        let n = self.num_players();
        (0..n).map(|i| (from + i) % n).find(|&p| self.needs_action(p))
    }

    /// Hands the turn to the next seat needing action, closing streets as needed.
    fn advance(&mut self, from: usize) {
        let mut from = from;
        loop {
            if self.live_players().len() <= 1 {
                self.finish();
                return;
            }
            if let Some(next) = self.seek(from) {
                self.to_act = Some(next);
                return;
            }
            if self.street == Street::River {
                self.finish();
                return;
            }
            self.street = self.street.next();
            self.street_bets.iter_mut().for_each(|b| *b = 0);
            self.acted.iter_mut().for_each(|a| *a = false);
            self.may_raise.iter_mut().for_each(|m| *m = true);
            self.current_bet = 0;
            self.min_raise = self.blinds.big;
            from = (self.button + 1) % self.num_players();
            debug!(street = ?self.street, pot = self.pot(), "street opened");
        }
    }

    fn finish(&mut self) {
        self.street = Street::Over;
        self.to_act = None;
        debug!(pot = self.pot(), "hand over");
    }
}

/// Seat of the default button for `n` players: the small blind lands in seat 0.
pub fn default_button(n: usize) -> usize {
    if n == 2 {
        0
    } else {
        n.saturating_sub(1)
    }
}

/// `(small blind seat, big blind seat)` for a button position.
pub fn blind_seats(button: usize, n: usize) -> (usize, usize) {
    if n == 2 {
        (button, (button + 1) % 2)
    } else {
        ((button + 1) % n, (button + 2) % n)
    }
}

/// Read-only projection of a [`GameState`] handed to policies.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    state: &'a GameState,
}

impl<'a> GameView<'a> {
    pub fn street(&self) -> Street {
        self.state.street()
    }

    pub fn num_players(&self) -> usize {
        self.state.num_players()
    }

    pub fn current_player(&self) -> Option<usize> {
        self.state.current_player()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn stacks(&self) -> &'a [u32] {
        self.state.stacks()
    }

    pub fn starting_stacks(&self) -> &'a [u32] {
        self.state.starting_stacks()
    }

    pub fn contributions(&self) -> &'a [u32] {
        self.state.contributions()
    }

    pub fn street_bets(&self) -> &'a [u32] {
        self.state.street_bets()
    }

    pub fn pot(&self) -> u32 {
        self.state.pot()
    }

    pub fn amount_to_call(&self) -> Vec<u32> {
        self.state.amount_to_call()
    }

    pub fn to_call(&self, player: usize) -> u32 {
        self.state.to_call(player)
    }

    pub fn current_bet(&self) -> u32 {
        self.state.current_bet()
    }

    pub fn min_raise_to(&self) -> u32 {
        self.state.min_raise_to()
    }

    pub fn max_raise_to(&self, player: usize) -> u32 {
        self.state.max_raise_to(player)
    }

    pub fn may_raise(&self, player: usize) -> bool {
        self.state.may_raise(player)
    }

    pub fn is_folded(&self, player: usize) -> bool {
        self.state.is_folded(player)
    }

    pub fn live_players(&self) -> Vec<usize> {
        self.state.live_players()
    }

    pub fn history(&self) -> &'a [ActionRecord] {
        self.state.history()
    }

    pub fn blinds(&self) -> Blinds {
        self.state.blinds()
    }

    pub fn button(&self) -> usize {
        self.state.button()
    }

    /// Checks a proposed action without applying it.
    pub fn validate(&self, action: &Action) -> Result<ValidatedAction, GameError> {
        self.state.validate(action)
    }
}
