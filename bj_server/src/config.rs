//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use blackjack::{ShuffleMode, server::DealerConfig};
use std::net::SocketAddr;

/// Default bind address
pub const DEFAULT_BIND: &str = "127.0.0.1:8642";

/// Upper bound on the session cap, mostly to catch typos.
pub const MAX_SESSIONS_LIMIT: usize = 10_000;

/// Complete server configuration loaded from CLI flags and environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Dealer settings handed to every session
    pub dealer: DealerConfig,
}

/// Values given on the command line. These win over the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub bind: Option<SocketAddr>,
    pub max_sessions: Option<usize>,
    pub shuffle: Option<String>,
    pub seed: Option<u64>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is present but can't be parsed
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is present but can't be parsed
    pub fn from_lookup<F>(overrides: Overrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match overrides.bind {
            Some(bind) => bind,
            None => parse_var(&lookup, "SERVER_BIND")?.unwrap_or_else(default_bind),
        };

        let max_sessions = match overrides.max_sessions {
            Some(max_sessions) => max_sessions,
            None => parse_var(&lookup, "MAX_SESSIONS")?.unwrap_or(0),
        };

        let shuffle = match overrides.shuffle.or_else(|| lookup("SHUFFLE_MODE")) {
            Some(mode) => mode.parse::<ShuffleMode>().map_err(|e| ConfigError::Invalid {
                var: "SHUFFLE_MODE".to_string(),
                reason: e.to_string(),
            })?,
            None => ShuffleMode::default(),
        };

        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => parse_var(&lookup, "DECK_SEED")?,
        };

        Ok(ServerConfig {
            bind,
            dealer: DealerConfig {
                max_sessions,
                shuffle,
                seed,
            },
        })
    }

    /// Validate configuration after loading
    ///
    /// # Errors
    ///
    /// Returns error if a value is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dealer.max_sessions > MAX_SESSIONS_LIMIT {
            return Err(ConfigError::Invalid {
                var: "MAX_SESSIONS".to_string(),
                reason: format!("Must be at most {MAX_SESSIONS_LIMIT} (0 for no limit)"),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8642))
}

/// Helper to parse an optional variable, failing loudly on garbage
fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
