//! Centralized balance and tuning constants for Hoopsim game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control.

// Summary tags -------------------------------------------------------------
pub(crate) const TAG_TWO_MADE: &str = "play.two.made";
pub(crate) const TAG_TWO_MISSED_DEFENSIVE: &str = "play.two.missed.defensive-rebound";
pub(crate) const TAG_TWO_MISSED_OFFENSIVE: &str = "play.two.missed.offensive-rebound";
pub(crate) const TAG_TWO_BLOCKED: &str = "play.two.blocked";
pub(crate) const TAG_THREE_MADE: &str = "play.three.made";
pub(crate) const TAG_THREE_MISSED_DEFENSIVE: &str = "play.three.missed.defensive-rebound";
pub(crate) const TAG_THREE_MISSED_OFFENSIVE: &str = "play.three.missed.offensive-rebound";
pub(crate) const TAG_THREE_BLOCKED: &str = "play.three.blocked";
pub(crate) const TAG_FREE_THROWS: &str = "play.free-throws";
pub(crate) const TAG_TURNOVER_STEAL: &str = "play.turnover.steal";
pub(crate) const TAG_TURNOVER_LOOSE: &str = "play.turnover.loose-ball";

// League-average fallbacks for missing box-score fields --------------------
pub(crate) const DEFAULT_POINTS: f64 = 10.0;
pub(crate) const DEFAULT_REBOUNDS: f64 = 5.0;
pub(crate) const DEFAULT_ASSISTS: f64 = 3.0;
pub(crate) const DEFAULT_FIELD_GOAL_PCT: f64 = 0.45;
pub(crate) const DEFAULT_THREE_POINT_PCT: f64 = 0.33;
pub(crate) const DEFAULT_FREE_THROW_PCT: f64 = 0.75;
pub(crate) const DEFAULT_TRUE_SHOOTING_PCT: f64 = 0.55;
pub(crate) const DEFAULT_MINUTES: f64 = 25.0;
pub(crate) const DEFAULT_STEALS: f64 = 0.8;
pub(crate) const DEFAULT_BLOCKS: f64 = 0.5;
pub(crate) const DEFAULT_TURNOVERS: f64 = 2.0;
pub(crate) const DEFAULT_HEIGHT_INCHES: u32 = 72;

// Attribute derivation -----------------------------------------------------
pub(crate) const EFFICIENCY_FG_WEIGHT: f64 = 0.5;
pub(crate) const EFFICIENCY_THREE_WEIGHT: f64 = 0.3;
pub(crate) const EFFICIENCY_FT_WEIGHT: f64 = 0.2;
pub(crate) const EFFICIENCY_SHOOTING_SHARE: f64 = 0.8;
pub(crate) const EFFICIENCY_VOLUME_SHARE: f64 = 0.2;
pub(crate) const CLUTCH_FT_WEIGHT: f64 = 0.6;
pub(crate) const CLUTCH_TS_WEIGHT: f64 = 0.4;
pub(crate) const CLUTCH_SCORER_THRESHOLD_PPG: f64 = 15.0;
pub(crate) const CLUTCH_SCORER_BONUS_PER_POINT: f64 = 0.004;
pub(crate) const CLUTCH_SCORER_BONUS_CAP: f64 = 0.05;
pub(crate) const STAMINA_REFERENCE_MINUTES: f64 = 40.0;
pub(crate) const THREE_TENDENCY_NON_SHOOTER_PCT: f64 = 0.20;
pub(crate) const THREE_TENDENCY_NON_SHOOTER: f64 = 0.05;
pub(crate) const THREE_TENDENCY_HIGH: f64 = 0.6;
pub(crate) const THREE_TENDENCY_MID: f64 = 0.4;
pub(crate) const THREE_TENDENCY_LOW: f64 = 0.2;
pub(crate) const THREE_TENDENCY_MID_PCT: f64 = 0.30;
pub(crate) const THREE_TENDENCY_HIGH_PCT: f64 = 0.36;
pub(crate) const BALL_SECURITY_BASELINE: f64 = 0.6;
pub(crate) const USAGE_POINTS_WEIGHT: f64 = 2.0;
pub(crate) const USAGE_ASSISTS_WEIGHT: f64 = 1.5;
pub(crate) const USAGE_SCALE: f64 = 100.0;

// Probability model --------------------------------------------------------
pub(crate) const TURNOVER_BASE: f64 = 0.12;
pub(crate) const TURNOVER_SECURITY_PIVOT: f64 = 1.6;
pub(crate) const STEAL_PRESSURE_PER_STEAL: f64 = 0.02;
pub(crate) const TURNOVER_MIN: f64 = 0.02;
pub(crate) const TURNOVER_MAX: f64 = 0.30;
pub(crate) const FREE_THROW_TRIP_BASE: f64 = 0.05;
pub(crate) const FREE_THROW_TRIP_USAGE_WEIGHT: f64 = 0.05;
pub(crate) const FREE_THROW_TRIP_MAX: f64 = 0.15;
pub(crate) const BLOCK_PER_BLOCK: f64 = 0.03;
pub(crate) const BLOCK_MAX: f64 = 0.12;
pub(crate) const BLOCK_INSIDE_MULTIPLIER: f64 = 1.5;
pub(crate) const CONTEST_IMPACT_WEIGHT: f64 = 0.05;
pub(crate) const CONTEST_HEIGHT_PER_INCH: f64 = 0.01;
pub(crate) const CONTEST_HEIGHT_MIN: f64 = -0.05;
pub(crate) const CONTEST_HEIGHT_MAX: f64 = 0.15;
pub(crate) const CONTEST_POSITION_BONUS: f64 = 0.03;
pub(crate) const FATIGUE_SHOT_PENALTY: f64 = 0.3;
pub(crate) const FATIGUE_FREE_THROW_PENALTY: f64 = 0.15;
pub(crate) const CLUTCH_MARGIN: u32 = 3;
pub(crate) const CLUTCH_WINDOW_MIN: i64 = 2;
pub(crate) const CLUTCH_WINDOW_DIVISOR: i64 = 4;
pub(crate) const CLUTCH_SWING: f64 = 0.3;
pub(crate) const MAKE_MIN: f64 = 0.05;
pub(crate) const MAKE_MAX: f64 = 0.95;
pub(crate) const FREE_THROW_MAKE_MAX: f64 = 0.98;
pub(crate) const OFFENSIVE_REBOUND_DEFENCE_WEIGHT: f64 = 1.5;
pub(crate) const OFFENSIVE_REBOUND_PER_INCH: f64 = 0.005;
pub(crate) const OFFENSIVE_REBOUND_MIN: f64 = 0.2;
pub(crate) const OFFENSIVE_REBOUND_MAX: f64 = 0.7;

// Fatigue ------------------------------------------------------------------
pub(crate) const FATIGUE_PER_POSSESSION: f64 = 0.01;
pub(crate) const STAMINA_RELIEF: f64 = 0.6;

// Match defaults -----------------------------------------------------------
pub(crate) const DEFAULT_TARGET_SCORE: i32 = 11;
pub(crate) const DEFAULT_WIN_BY: u32 = 1;
pub(crate) const DEFAULT_POSSESSION_CAP: u32 = 500;
