//! Player records as supplied by the caller's data store.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::constants::{
    DEFAULT_ASSISTS, DEFAULT_BLOCKS, DEFAULT_FIELD_GOAL_PCT, DEFAULT_FREE_THROW_PCT,
    DEFAULT_HEIGHT_INCHES, DEFAULT_MINUTES, DEFAULT_POINTS, DEFAULT_REBOUNDS, DEFAULT_STEALS,
    DEFAULT_THREE_POINT_PCT, DEFAULT_TRUE_SHOOTING_PCT, DEFAULT_TURNOVERS,
};

/// Stable identifier of a player. Rosters may store ids as numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(value) => Self(value.to_string()),
            RawId::Text(value) => Self::new(value),
        })
    }
}

/// Listed position, parsed leniently from roster strings such as `"G"` or `"F-C"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    PointGuard,
    ShootingGuard,
    #[default]
    SmallForward,
    PowerForward,
    Center,
}

impl Position {
    /// Parse a listed position. Combo listings resolve to their biggest role:
    /// any big wins, then a forward, then a guard. Unknown input is a small
    /// forward.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        const PRIORITY: [Position; 5] = [
            Position::Center,
            Position::PowerForward,
            Position::SmallForward,
            Position::PointGuard,
            Position::ShootingGuard,
        ];
        let listed: Vec<Self> = raw
            .split(['-', '/', ',', ' '])
            .filter_map(Self::from_token)
            .collect();
        PRIORITY
            .into_iter()
            .find(|position| listed.contains(position))
            .unwrap_or_default()
    }

    fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "PG" => Some(Self::PointGuard),
            "SG" | "G" | "GUARD" => Some(Self::ShootingGuard),
            "SF" | "F" | "FORWARD" => Some(Self::SmallForward),
            "PF" => Some(Self::PowerForward),
            "C" | "CENTER" => Some(Self::Center),
            _ => None,
        }
    }

    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::PointGuard => "PG",
            Self::ShootingGuard => "SG",
            Self::SmallForward => "SF",
            Self::PowerForward => "PF",
            Self::Center => "C",
        }
    }

    /// Centers and power forwards.
    #[must_use]
    pub const fn is_big(self) -> bool {
        matches!(self, Self::PowerForward | Self::Center)
    }

    #[must_use]
    pub const fn is_guard(self) -> bool {
        matches!(self, Self::PointGuard | Self::ShootingGuard)
    }

    /// Shooting guards and small forwards, the best perimeter defenders.
    #[must_use]
    pub const fn is_wing(self) -> bool {
        matches!(self, Self::ShootingGuard | Self::SmallForward)
    }
}

impl From<String> for Position {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.abbreviation().to_string()
    }
}

/// Season box-score line. Every field is optional; accessors substitute
/// league-average values for anything missing or malformed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeasonStats {
    #[serde(default, alias = "ppg", alias = "Points Per Game (PPG)")]
    pub points: Option<f64>,
    #[serde(default, alias = "rpg", alias = "Rebounds Per Game (RPG)")]
    pub rebounds: Option<f64>,
    #[serde(default, alias = "apg", alias = "Assists Per Game (APG)")]
    pub assists: Option<f64>,
    #[serde(default, alias = "fg_pct", alias = "Field Goal Percentage (FG%)")]
    pub field_goal_pct: Option<f64>,
    #[serde(default, alias = "three_pct", alias = "Three-Point Percentage (3P%)")]
    pub three_point_pct: Option<f64>,
    #[serde(default, alias = "ft_pct", alias = "Free Throw Percentage (FT%)")]
    pub free_throw_pct: Option<f64>,
    #[serde(default, alias = "ts_pct", alias = "True Shooting Percentage (TS%)")]
    pub true_shooting_pct: Option<f64>,
    #[serde(default, alias = "mpg", alias = "Average Minutes Per Game (MPG)")]
    pub minutes: Option<f64>,
    #[serde(default, alias = "tov", alias = "Turnovers Per Game (TOV)")]
    pub turnovers: Option<f64>,
    #[serde(default, alias = "spg", alias = "Steals Per Game (SPG)")]
    pub steals: Option<f64>,
    #[serde(default, alias = "bpg", alias = "Blocks Per Game (BPG)")]
    pub blocks: Option<f64>,
    #[serde(default, alias = "orpg", alias = "Offensive Rebounds Per Game (ORPG)")]
    pub offensive_rebounds: Option<f64>,
    #[serde(default, alias = "fga", alias = "Field Goals Attempted (FGA)")]
    pub field_goal_attempts: Option<f64>,
    #[serde(default, alias = "three_pa", alias = "Three-Point Attempts (3PA)")]
    pub three_point_attempts: Option<f64>,
}

fn per_game(value: Option<f64>, default: f64) -> f64 {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(default)
}

/// Accept both fractions (0.452) and percentages (45.2).
fn ratio(value: Option<f64>, default: f64) -> f64 {
    let value = per_game(value, default);
    let value = if value > 1.0 { value / 100.0 } else { value };
    value.clamp(0.0, 1.0)
}

impl SeasonStats {
    #[must_use]
    pub fn points(&self) -> f64 {
        per_game(self.points, DEFAULT_POINTS)
    }

    #[must_use]
    pub fn rebounds(&self) -> f64 {
        per_game(self.rebounds, DEFAULT_REBOUNDS)
    }

    #[must_use]
    pub fn assists(&self) -> f64 {
        per_game(self.assists, DEFAULT_ASSISTS)
    }

    #[must_use]
    pub fn field_goal_pct(&self) -> f64 {
        ratio(self.field_goal_pct, DEFAULT_FIELD_GOAL_PCT)
    }

    #[must_use]
    pub fn three_point_pct(&self) -> f64 {
        ratio(self.three_point_pct, DEFAULT_THREE_POINT_PCT)
    }

    #[must_use]
    pub fn free_throw_pct(&self) -> f64 {
        ratio(self.free_throw_pct, DEFAULT_FREE_THROW_PCT)
    }

    #[must_use]
    pub fn true_shooting_pct(&self) -> f64 {
        ratio(self.true_shooting_pct, DEFAULT_TRUE_SHOOTING_PCT)
    }

    #[must_use]
    pub fn minutes(&self) -> f64 {
        per_game(self.minutes, DEFAULT_MINUTES)
    }

    #[must_use]
    pub fn turnovers(&self) -> f64 {
        per_game(self.turnovers, DEFAULT_TURNOVERS)
    }

    #[must_use]
    pub fn steals(&self) -> f64 {
        per_game(self.steals, DEFAULT_STEALS)
    }

    #[must_use]
    pub fn blocks(&self) -> f64 {
        per_game(self.blocks, DEFAULT_BLOCKS)
    }

    /// Offensive rebounds when reported, never more than total rebounds.
    #[must_use]
    pub fn offensive_rebounds(&self) -> Option<f64> {
        self.offensive_rebounds
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.min(self.rebounds()))
    }

    /// Share of field-goal attempts taken from three, when both volumes are reported.
    #[must_use]
    pub fn three_point_attempt_rate(&self) -> Option<f64> {
        let attempts = self.field_goal_attempts.filter(|v| v.is_finite() && *v > 0.0)?;
        let threes = self
            .three_point_attempts
            .filter(|v| v.is_finite() && *v >= 0.0)?;
        Some((threes / attempts).clamp(0.0, 1.0))
    }

    /// Assist share of assists plus turnovers, when both are reported.
    #[must_use]
    pub fn assist_share(&self) -> Option<f64> {
        let assists = self.assists.filter(|v| v.is_finite() && *v >= 0.0)?;
        let turnovers = self.turnovers.filter(|v| v.is_finite() && *v >= 0.0)?;
        let total = assists + turnovers;
        (total > 0.0).then(|| assists / total)
    }
}

/// Immutable input record for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(flatten)]
    pub stats: SeasonStats,
}

impl PlayerRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Position) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            team: String::new(),
            position,
            height: None,
            stats: SeasonStats::default(),
        }
    }

    #[must_use]
    pub fn with_stats(mut self, stats: SeasonStats) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Height in inches, defaulting when absent or malformed.
    #[must_use]
    pub fn height_inches(&self) -> u32 {
        self.height
            .as_deref()
            .and_then(parse_height)
            .unwrap_or(DEFAULT_HEIGHT_INCHES)
    }

    /// A record is usable when it carries an id and a display name.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty() && !self.name.trim().is_empty()
    }
}

/// Parse heights written as `6'10"`, `6'10`, `6-10`, or plain inches.
#[must_use]
pub fn parse_height(raw: &str) -> Option<u32> {
    let cleaned = raw.trim().trim_end_matches('"').trim();
    if cleaned.is_empty() {
        return None;
    }
    let Some((feet, inches)) = cleaned.split_once(['\'', '-']) else {
        return cleaned.parse::<u32>().ok().filter(|v| (48..=108).contains(v));
    };
    let feet: u32 = feet.trim().parse().ok()?;
    let inches = inches.trim();
    let inches: u32 = if inches.is_empty() {
        0
    } else {
        inches.parse().ok()?
    };
    if inches >= 12 || !(4..=9).contains(&feet) {
        return None;
    }
    Some(feet * 12 + inches)
}
