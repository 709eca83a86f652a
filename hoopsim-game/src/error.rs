//! Failure taxonomy for a single simulation call.
use thiserror::Error;

use crate::config::ConfigError;

/// Message shown to users whenever a simulation cannot produce a result.
pub const SIMULATION_UNAVAILABLE: &str = "simulation unavailable for this input";

/// Errors local to one `simulate` call. No partial state survives any of them.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid player {id:?}: {reason}")]
    InvalidPlayer { id: String, reason: &'static str },
    #[error("invalid match configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("simulation diverged after {possessions} possessions (score {score1}-{score2})")]
    Diverged {
        possessions: u32,
        score1: u32,
        score2: u32,
    },
    #[error("simulation cancelled after {possessions} possessions")]
    Cancelled { possessions: u32 },
}

impl SimError {
    /// User-facing description that never exposes internal state.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        SIMULATION_UNAVAILABLE
    }

    pub(crate) fn invalid_player(id: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidPlayer {
            id: id.into(),
            reason,
        }
    }
}
