//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value next to where it
//! came from (`default`, `file` or `env`):
//!
//! ```json
//! {
//!   "level": {
//!     "source": "default",
//!     "value": 1
//!   },
//!   ...
//! }
//! ```

use crate::config::ConfigResolved;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "level": {
            "value": config.level,
            "source": sources.level,
        },
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "trials": {
            "value": config.trials,
            "source": sources.trials,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
