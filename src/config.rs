//! Desk configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_TYPING_INTERVAL_MS: u64 = 20;
pub const DEFAULT_FEED_PERIOD_MS: u64 = 15_000;
pub const DEFAULT_FEED_CAPACITY: usize = 10;

const TYPING_INTERVAL_VAR: &str = "QUERYDESK_TYPING_INTERVAL_MS";
const FEED_PERIOD_VAR: &str = "QUERYDESK_FEED_PERIOD_MS";
const FEED_CAPACITY_VAR: &str = "QUERYDESK_FEED_CAPACITY";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed as an unsigned integer.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    /// A variable parsed but would stall a timer or empty the feed.
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

impl crate::notice::ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "E_CONFIG_INVALID",
            Self::Zero { .. } => "E_CONFIG_ZERO",
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeskConfig {
    /// Delay between revealed characters of a canned response.
    pub typing_interval: Duration,
    /// Period of the live feed generator.
    pub feed_period: Duration,
    /// Maximum number of live queries kept, newest first.
    pub feed_capacity: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            typing_interval: Duration::from_millis(DEFAULT_TYPING_INTERVAL_MS),
            feed_period: Duration::from_millis(DEFAULT_FEED_PERIOD_MS),
            feed_capacity: DEFAULT_FEED_CAPACITY,
        }
    }
}

impl DeskConfig {
    /// Build typed desk config from environment variables.
    ///
    /// Optional:
    /// - `QUERYDESK_TYPING_INTERVAL_MS`: default 20
    /// - `QUERYDESK_FEED_PERIOD_MS`: default 15000
    /// - `QUERYDESK_FEED_CAPACITY`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a malformed or zero value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. `from_env` delegates here.
    ///
    /// # Errors
    ///
    /// Returns an error if a present value is malformed or zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let typing_ms = parse_positive(&lookup, TYPING_INTERVAL_VAR, DEFAULT_TYPING_INTERVAL_MS)?;
        let period_ms = parse_positive(&lookup, FEED_PERIOD_VAR, DEFAULT_FEED_PERIOD_MS)?;
        let capacity = parse_positive(&lookup, FEED_CAPACITY_VAR, DEFAULT_FEED_CAPACITY)?;

        Ok(Self {
            typing_interval: Duration::from_millis(typing_ms),
            feed_period: Duration::from_millis(period_ms),
            feed_capacity: capacity,
        })
    }
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { var, value: raw.clone() })?;
    if value == T::default() {
        return Err(ConfigError::Zero { var });
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
