//! Match rules and their validation.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_POSSESSION_CAP, DEFAULT_TARGET_SCORE, DEFAULT_WIN_BY};

/// Who gets the ball after a made basket or a free-throw trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PossessionRule {
    /// Ball changes hands after every score.
    #[default]
    Alternate,
    /// The scorer keeps the ball.
    MakeItTakeIt,
}

/// Point values for each kind of attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRules {
    /// Twos, threes, and two free throws per trip.
    #[default]
    Standard,
    /// Ones inside the arc, twos outside, one free throw per trip.
    Streetball,
}

impl ScoringRules {
    #[must_use]
    pub const fn two_point_value(self) -> u32 {
        match self {
            Self::Standard => 2,
            Self::Streetball => 1,
        }
    }

    #[must_use]
    pub const fn three_point_value(self) -> u32 {
        match self {
            Self::Standard => 3,
            Self::Streetball => 2,
        }
    }

    #[must_use]
    pub const fn free_throws_per_trip(self) -> u8 {
        match self {
            Self::Standard => 2,
            Self::Streetball => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("target_score must be positive (got {value})")]
    NonPositiveTarget { value: i32 },
    #[error("win_by must be at least 1")]
    ZeroWinBy,
    #[error("possession_cap must be at least 1")]
    ZeroPossessionCap,
}

/// Rules for one matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default = "MatchConfig::default_target_score")]
    pub target_score: i32,
    #[serde(default = "MatchConfig::default_win_by")]
    pub win_by: u32,
    #[serde(default = "MatchConfig::default_possession_cap")]
    pub possession_cap: u32,
    #[serde(default)]
    pub possession_rule: PossessionRule,
    #[serde(default)]
    pub scoring: ScoringRules,
}

impl MatchConfig {
    #[must_use]
    pub const fn default_target_score() -> i32 {
        DEFAULT_TARGET_SCORE
    }

    #[must_use]
    pub const fn default_win_by() -> u32 {
        DEFAULT_WIN_BY
    }

    #[must_use]
    pub const fn default_possession_cap() -> u32 {
        DEFAULT_POSSESSION_CAP
    }

    /// Default rules played to the given target.
    #[must_use]
    pub fn with_target(target_score: i32) -> Self {
        Self {
            target_score,
            ..Self::default()
        }
    }

    /// Validate configuration invariants before a run starts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a field is outside its documented range.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.target_score <= 0 {
            return Err(ConfigError::NonPositiveTarget {
                value: self.target_score,
            });
        }
        if self.win_by == 0 {
            return Err(ConfigError::ZeroWinBy);
        }
        if self.possession_cap == 0 {
            return Err(ConfigError::ZeroPossessionCap);
        }
        Ok(())
    }

    /// Target score as an unsigned value. Only meaningful after `validate`.
    #[must_use]
    pub fn target(&self) -> u32 {
        u32::try_from(self.target_score).unwrap_or(0)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            target_score: Self::default_target_score(),
            win_by: Self::default_win_by(),
            possession_cap: Self::default_possession_cap(),
            possession_rule: PossessionRule::default(),
            scoring: ScoringRules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.target_score, 11);
        assert_eq!(cfg.win_by, 1);
        assert_eq!(cfg.possession_cap, 500);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_target() {
        assert_eq!(
            MatchConfig::with_target(0).validate(),
            Err(ConfigError::NonPositiveTarget { value: 0 })
        );
        assert!(MatchConfig::with_target(-5).validate().is_err());
    }

    #[test]
    fn rejects_zero_margins() {
        let cfg = MatchConfig {
            win_by: 0,
            ..MatchConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroWinBy));
        let cfg = MatchConfig {
            possession_cap: 0,
            ..MatchConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroPossessionCap));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: MatchConfig =
            serde_json::from_str(r#"{"target_score": 21, "scoring": "streetball"}"#).unwrap();
        assert_eq!(cfg.target_score, 21);
        assert_eq!(cfg.scoring, ScoringRules::Streetball);
        assert_eq!(cfg.possession_rule, PossessionRule::Alternate);
        assert_eq!(cfg.scoring.three_point_value(), 2);
    }
}
