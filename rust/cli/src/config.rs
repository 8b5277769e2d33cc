//! Layered configuration: defaults, then an optional TOML file named by
//! `HOLDEM_CONFIG`, then `HOLDEM_*` environment variables. Command-line
//! flags are applied on top by each command.

use holdem_engine::cards::{MAX_PLAYERS, MIN_PLAYERS};
use holdem_engine::rules::MAX_LEVEL;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

pub const CONFIG_VAR: &str = "HOLDEM_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub level: u8,
    pub players: usize,
    pub seed: Option<u64>,
    /// Monte-Carlo trials for `odds`
    pub trials: usize,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub level: ValueSource,
    pub players: ValueSource,
    pub seed: ValueSource,
    pub trials: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            level: ValueSource::Default,
            players: ValueSource::Default,
            seed: ValueSource::Default,
            trials: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_stack: 200,
            level: 1,
            players: 2,
            seed: None,
            trials: 10_000,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Resolves the configuration with `var` standing in for the process
/// environment.
pub fn load_from<F>(var: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = var(CONFIG_VAR).filter(|p| !p.is_empty()) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.level {
            cfg.level = v;
            sources.level = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.trials {
            cfg.trials = v;
            sources.trials = ValueSource::File;
        }
    }

    if let Some(seed) = var("HOLDEM_SEED").filter(|v| !v.is_empty()) {
        cfg.seed = Some(parse_var(&seed, "seed")?);
        sources.seed = ValueSource::Env;
    }
    if let Some(level) = var("HOLDEM_LEVEL").filter(|v| !v.is_empty()) {
        cfg.level = parse_var(&level, "level")?;
        sources.level = ValueSource::Env;
    }
    if let Some(players) = var("HOLDEM_PLAYERS").filter(|v| !v.is_empty()) {
        cfg.players = parse_var(&players, "players")?;
        sources.players = ValueSource::Env;
    }
    if let Some(stack) = var("HOLDEM_STACK").filter(|v| !v.is_empty()) {
        cfg.starting_stack = parse_var(&stack, "starting_stack")?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(trials) = var("HOLDEM_TRIALS").filter(|v| !v.is_empty()) {
        cfg.trials = parse_var(&trials, "trials")?;
        sources.trials = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn parse_var<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", name, raw)))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    level: Option<u8>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    trials: Option<usize>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(1..=MAX_LEVEL).contains(&cfg.level) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: level must be between 1 and {}",
            MAX_LEVEL
        )));
    }
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&cfg.players) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: players must be between {} and {}",
            MIN_PLAYERS, MAX_PLAYERS
        )));
    }
    if cfg.trials == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: trials must be >0".into(),
        ));
    }
    Ok(())
}
