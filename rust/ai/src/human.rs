//! Line-oriented human input.
//!
//! Accepted commands: `fold`, `check`, `call`, `bet N`, `raise N`,
//! `raise to N` and `allin`. Amounts are street totals. Unparsable or illegal
//! input is reported and the player is asked again.

use std::io::{self, BufRead, BufReader, Write};

use holdem_engine::cards::{Board, HoleCards};
use holdem_engine::game::{Action, GameView};
use tracing::warn;

use crate::Policy;

/// What the player typed, before it is tied to a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fold,
    Check,
    Call,
    To(u32),
    AllIn,
}

/// Parses one line of input.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let lowered = line.trim().to_ascii_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let amount = |s: &str| {
        s.parse::<u32>()
            .map_err(|_| format!("not a chip amount: {s}"))
    };
    match words.as_slice() {
        ["fold"] | ["f"] => Ok(Command::Fold),
        ["check"] | ["x"] => Ok(Command::Check),
        ["call"] | ["c"] => Ok(Command::Call),
        ["allin"] | ["all-in"] | ["all", "in"] | ["shove"] => Ok(Command::AllIn),
        ["bet", n] | ["raise", n] | ["raise", "to", n] | ["b", n] | ["r", n] => {
            amount(*n).map(Command::To)
        }
        [] => Err("empty input".to_string()),
        _ => Err(format!("unrecognised command: {}", line.trim())),
    }
}

/// Asks a person for every decision.
pub struct HumanPolicy {
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

impl HumanPolicy {
    pub fn new(input: Box<dyn BufRead + Send>, output: Box<dyn Write + Send>) -> Self {
        Self { input, output }
    }

    /// Reads stdin and prompts on stderr so stdout stays clean.
    pub fn stdio() -> Self {
        Self::new(
            Box::new(BufReader::new(io::stdin())),
            Box::new(io::stderr()),
        )
    }

    fn describe(&mut self, player: usize, view: &GameView<'_>, hole: &HoleCards, board: &Board) {
        let _ = writeln!(
            self.output,
            "[{:?}] seat {player} holds {hole} | board: {} | pot {} | to call {} | stack {}",
            view.street(),
            if board.is_empty() { "-".to_string() } else { board.to_string() },
            view.pot(),
            view.to_call(player),
            view.stacks()[player],
        );
    }

    fn to_action(player: usize, view: &GameView<'_>, cmd: Command) -> Action {
        match cmd {
            Command::Fold => Action::fold(player),
            Command::Check | Command::Call => Action::check_call(player),
            Command::To(to) => Action::bet_raise(player, to),
            Command::AllIn => {
                let to = view.max_raise_to(player);
                if to > view.current_bet() {
                    Action::bet_raise(player, to)
                } else {
                    Action::check_call(player)
                }
            }
        }
    }
}

impl Policy for HumanPolicy {
    fn select_action(
        &mut self,
        player: usize,
        view: &GameView<'_>,
        hole: &HoleCards,
        board: &Board,
    ) -> Action {
        self.describe(player, view, hole, board);
        loop {
            let _ = write!(self.output, "> ");
            let _ = self.output.flush();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    warn!(player, "input closed, checking or folding");
                    return if view.to_call(player) == 0 {
                        Action::check_call(player)
                    } else {
                        Action::fold(player)
                    };
                }
                Ok(_) => {}
            }
            let cmd = match parse_command(&line) {
                Ok(cmd) => cmd,
                Err(msg) => {
                    let _ = writeln!(self.output, "{msg}");
                    continue;
                }
            };
            // "check" while facing a bet is a mistake, not a call.
            if cmd == Command::Check && view.to_call(player) > 0 {
                let _ = writeln!(self.output, "cannot check, {} to call", view.to_call(player));
                continue;
            }
            let action = Self::to_action(player, view, cmd);
            match view.validate(&action) {
                Ok(_) => return action,
                Err(e) => {
                    let _ = writeln!(self.output, "illegal: {e}");
                }
            }
        }
    }

    fn name(&self) -> &str {
        "Human"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::game::GameState;
    use holdem_engine::rules::Blinds;
    use std::io::Cursor;

    fn policy(input: &str) -> HumanPolicy {
        HumanPolicy::new(
            Box::new(Cursor::new(input.to_string().into_bytes())),
            Box::new(io::sink()),
        )
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("Fold"), Ok(Command::Fold));
        assert_eq!(parse_command("  raise to 40 "), Ok(Command::To(40)));
        assert_eq!(parse_command("bet 12"), Ok(Command::To(12)));
        assert_eq!(parse_command("all in"), Ok(Command::AllIn));
        assert!(parse_command("raise lots").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn reprompts_until_legal() {
        let g = GameState::new(vec![100, 100, 100], Blinds { small: 1, big: 2 }).unwrap();
        let hole: HoleCards = "AcAd".parse().unwrap();
        // Garbage, a check while facing the blind, a raise below the minimum, then a call.
        let mut p = policy("dance\ncheck\nraise 3\ncall\n");
        let a = p.select_action(2, &g.view(), &hole, &Board::empty());
        assert_eq!(a, Action::check_call(2));
    }

    #[test]
    fn closed_input_folds_when_facing_a_bet() {
        let g = GameState::new(vec![100, 100, 100], Blinds { small: 1, big: 2 }).unwrap();
        let hole: HoleCards = "AcAd".parse().unwrap();
        let mut p = policy("");
        let a = p.select_action(2, &g.view(), &hole, &Board::empty());
        assert_eq!(a, Action::fold(2));
    }
}
