//! Command handler modules for the holdem CLI.
//!
//! Each command lives in its own file with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Dependency injection: output streams (`&mut dyn Write`) passed as parameters
//! - Error propagation: all errors propagated via `CliError`

mod cfg;
mod deal;
mod odds;
mod play;
mod rank;
mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use odds::{OddsArgs, handle_odds_command};
pub use play::{PlayArgs, handle_play_command};
pub use rank::handle_rank_command;
pub use sim::{SimArgs, handle_sim_command};
