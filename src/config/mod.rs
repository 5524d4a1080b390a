//! Configuration module - environment variable parsing

use std::env;
use std::str::FromStr;

use crate::game::combat::ScorePolicy;

/// Highest accepted `SIM_TICK_RATE`
pub const MAX_TICK_RATE: u32 = 1000;

/// Gameplay switches consumed by the store and the match host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameplayConfig {
    /// Points awarded per elimination
    pub score_policy: ScorePolicy,
    /// Throttle `shoot_weapon` to the weapon's fire rate
    pub enforce_fire_rate: bool,
    /// Reject phase operations outside the transition table
    pub strict_phases: bool,
    /// Host ends the match on death, time up or kill limit
    pub auto_end: bool,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            score_policy: ScorePolicy::Fixed,
            enforce_fire_rate: false,
            strict_phases: false,
            auto_end: true,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Simulation frames per second
    pub tick_rate: u32,
    /// Snapshots broadcast per second
    pub snapshot_rate: u32,
    /// Match RNG seed; random when unset
    pub seed: Option<u64>,

    /// Map and mode for the headless match
    pub map_id: String,
    pub mode_id: String,
    /// Seconds the headless match runs before shutting down
    pub run_secs: u64,

    pub gameplay: GameplayConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let tick_rate: u32 = parse_var("SIM_TICK_RATE", 60)?;
        let snapshot_rate: u32 = parse_var("SIM_SNAPSHOT_RATE", 20)?;
        check_rates(tick_rate, snapshot_rate)?;

        let seed = match env::var("SIM_SEED") {
            Ok(raw) => Some(raw.parse().map_err(|_| invalid("SIM_SEED", &raw))?),
            Err(_) => None,
        };

        let score_policy = match env::var("SIM_SCORE_POLICY") {
            Ok(raw) => match raw.to_ascii_lowercase().as_str() {
                "fixed" => ScorePolicy::Fixed,
                "archetype" => ScorePolicy::Archetype,
                _ => return Err(invalid("SIM_SCORE_POLICY", &raw)),
            },
            Err(_) => ScorePolicy::Fixed,
        };

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            tick_rate,
            snapshot_rate,
            seed,

            map_id: env::var("SIM_MAP").unwrap_or_else(|_| "training".to_string()),
            mode_id: env::var("SIM_MODE").unwrap_or_else(|_| "deathmatch".to_string()),
            run_secs: parse_var("SIM_RUN_SECS", 30)?,

            gameplay: GameplayConfig {
                score_policy,
                enforce_fire_rate: parse_flag("SIM_ENFORCE_FIRE_RATE", false)?,
                strict_phases: parse_flag("SIM_STRICT_PHASES", false)?,
                auto_end: parse_flag("SIM_AUTO_END", true)?,
            },
        })
    }
}

/// Frame rate in 1..=MAX_TICK_RATE, snapshot rate in 1..=tick rate
fn check_rates(tick_rate: u32, snapshot_rate: u32) -> Result<(), ConfigError> {
    if tick_rate == 0 || tick_rate > MAX_TICK_RATE {
        return Err(invalid("SIM_TICK_RATE", &tick_rate.to_string()));
    }
    if snapshot_rate == 0 || snapshot_rate > tick_rate {
        return Err(invalid("SIM_SNAPSHOT_RATE", &snapshot_rate.to_string()));
    }
    Ok(())
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|_| invalid(var, &raw)),
        Err(_) => Ok(default),
    }
}

fn parse_flag(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(var) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(invalid(var, &raw)),
        },
        Err(_) => Ok(default),
    }
}

fn invalid(var: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
