use std::collections::VecDeque;

use holdem_engine::cards::{Board, HoleCards};
use holdem_engine::game::{Action, GameView};

use crate::Policy;

/// One pre-recorded decision, independent of the seat that plays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedMove {
    Fold,
    CheckCall,
    /// Bet or raise to this street total
    RaiseTo(u32),
    AllIn,
}

/// Replays moves in order. Once the script runs out it checks when that is
/// free and folds otherwise.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPolicy {
    moves: VecDeque<ScriptedMove>,
}

impl ScriptedPolicy {
    pub fn new(moves: Vec<ScriptedMove>) -> Self {
        Self {
            moves: moves.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl Policy for ScriptedPolicy {
    fn select_action(
        &mut self,
        player: usize,
        view: &GameView<'_>,
        _hole: &HoleCards,
        _board: &Board,
    ) -> Action {
        match self.moves.pop_front() {
            Some(ScriptedMove::Fold) => Action::fold(player),
            Some(ScriptedMove::CheckCall) => Action::check_call(player),
            Some(ScriptedMove::RaiseTo(to)) => Action::bet_raise(player, to),
            Some(ScriptedMove::AllIn) => {
                let to = view.max_raise_to(player);
                if to > view.current_bet() {
                    Action::bet_raise(player, to)
                } else {
                    Action::check_call(player)
                }
            }
            None if view.to_call(player) == 0 => Action::check_call(player),
            None => Action::fold(player),
        }
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}
