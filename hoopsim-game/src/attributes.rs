//! Derivation of latent gameplay parameters from season box-score stats.
use serde::{Deserialize, Serialize};

use crate::constants::{
    BALL_SECURITY_BASELINE, CLUTCH_FT_WEIGHT, CLUTCH_SCORER_BONUS_CAP,
    CLUTCH_SCORER_BONUS_PER_POINT, CLUTCH_SCORER_THRESHOLD_PPG, CLUTCH_TS_WEIGHT,
    DEFAULT_FIELD_GOAL_PCT, DEFAULT_FREE_THROW_PCT, DEFAULT_MINUTES, DEFAULT_POINTS,
    DEFAULT_THREE_POINT_PCT, EFFICIENCY_FG_WEIGHT, EFFICIENCY_FT_WEIGHT,
    EFFICIENCY_SHOOTING_SHARE, EFFICIENCY_THREE_WEIGHT, EFFICIENCY_VOLUME_SHARE,
    STAMINA_REFERENCE_MINUTES, THREE_TENDENCY_HIGH, THREE_TENDENCY_HIGH_PCT,
    THREE_TENDENCY_LOW, THREE_TENDENCY_MID, THREE_TENDENCY_MID_PCT, THREE_TENDENCY_NON_SHOOTER,
    THREE_TENDENCY_NON_SHOOTER_PCT, USAGE_ASSISTS_WEIGHT, USAGE_POINTS_WEIGHT, USAGE_SCALE,
};
use crate::numbers::{clamp_unit, non_negative};
use crate::player::{PlayerRecord, Position, SeasonStats};

/// Gameplay parameters derived once per simulation from a `PlayerRecord`.
///
/// Fields documented as ratios are always inside [0, 1]; the remaining
/// scalars are non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedAttributes {
    /// Shooting and volume composite; a league-average player sits near 1.0.
    pub scoring_efficiency: f64,
    /// Ratio.
    pub clutch_rating: f64,
    /// Ratio. Higher values slow in-game fatigue.
    pub stamina: f64,
    /// Ratio of shot attempts taken from three.
    pub three_point_tendency: f64,
    pub estimated_blocks: f64,
    pub estimated_steals: f64,
    /// Ratio.
    pub usage_rate: f64,
    /// Ratio. Share of ball-handling outcomes that are not turnovers.
    pub ball_security: f64,
    pub offensive_rebounding: f64,
    pub defensive_rebounding: f64,
    pub defensive_impact: f64,
    pub height_inches: u32,
    pub position: Position,
    /// Ratio.
    pub field_goal_pct: f64,
    /// Ratio.
    pub three_point_pct: f64,
    /// Ratio.
    pub free_throw_pct: f64,
}

struct PositionProfile {
    block_scale: f64,
    steal_scale: f64,
    offensive_rebound_share: f64,
}

const fn position_profile(position: Position) -> PositionProfile {
    if position.is_big() {
        PositionProfile {
            block_scale: 1.25,
            steal_scale: 0.8,
            offensive_rebound_share: 0.35,
        }
    } else if position.is_guard() {
        PositionProfile {
            block_scale: 0.6,
            steal_scale: 1.25,
            offensive_rebound_share: 0.2,
        }
    } else {
        PositionProfile {
            block_scale: 1.0,
            steal_scale: 1.0,
            offensive_rebound_share: 0.25,
        }
    }
}

impl EnhancedAttributes {
    /// Derive attributes from a player record. Pure and total: missing or
    /// malformed stats are replaced field-by-field with league defaults.
    #[must_use]
    pub fn derive(player: &PlayerRecord) -> Self {
        let stats = &player.stats;
        let profile = position_profile(player.position);

        let (estimated_blocks, estimated_steals) = defensive_estimates(player.position, stats);
        let rebounds = stats.rebounds();
        let offensive_rebounding = stats
            .offensive_rebounds()
            .unwrap_or(rebounds * profile.offensive_rebound_share);
        let defensive_rebounding = non_negative(rebounds - offensive_rebounding);
        let defensive_impact = non_negative(
            rebounds.mul_add(0.5, estimated_blocks.mul_add(2.0, estimated_steals * 1.5)) / 10.0,
        );

        Self {
            scoring_efficiency: scoring_efficiency(stats),
            clutch_rating: clutch_rating(stats),
            stamina: clamp_unit(stats.minutes() / STAMINA_REFERENCE_MINUTES),
            three_point_tendency: three_point_tendency(stats),
            estimated_blocks,
            estimated_steals,
            usage_rate: clamp_unit(
                stats
                    .points()
                    .mul_add(USAGE_POINTS_WEIGHT, stats.assists() * USAGE_ASSISTS_WEIGHT)
                    / USAGE_SCALE,
            ),
            ball_security: clamp_unit(stats.assist_share().unwrap_or(BALL_SECURITY_BASELINE)),
            offensive_rebounding: non_negative(offensive_rebounding),
            defensive_rebounding,
            defensive_impact,
            height_inches: player.height_inches(),
            position: player.position,
            field_goal_pct: clamp_unit(stats.field_goal_pct()),
            three_point_pct: clamp_unit(stats.three_point_pct()),
            free_throw_pct: clamp_unit(stats.free_throw_pct()),
        }
    }
}

fn shooting_composite(fg: f64, three: f64, ft: f64) -> f64 {
    fg.mul_add(
        EFFICIENCY_FG_WEIGHT,
        three.mul_add(EFFICIENCY_THREE_WEIGHT, ft * EFFICIENCY_FT_WEIGHT),
    )
}

fn scoring_efficiency(stats: &SeasonStats) -> f64 {
    let reference_shooting = shooting_composite(
        DEFAULT_FIELD_GOAL_PCT,
        DEFAULT_THREE_POINT_PCT,
        DEFAULT_FREE_THROW_PCT,
    );
    let reference_volume = DEFAULT_POINTS / DEFAULT_MINUTES;

    let shooting = shooting_composite(
        stats.field_goal_pct(),
        stats.three_point_pct(),
        stats.free_throw_pct(),
    );
    let volume = stats.points() / stats.minutes().max(1.0);
    non_negative(
        (shooting / reference_shooting).mul_add(
            EFFICIENCY_SHOOTING_SHARE,
            (volume / reference_volume) * EFFICIENCY_VOLUME_SHARE,
        ),
    )
}

fn clutch_rating(stats: &SeasonStats) -> f64 {
    let base = stats.free_throw_pct().mul_add(
        CLUTCH_FT_WEIGHT,
        stats.true_shooting_pct() * CLUTCH_TS_WEIGHT,
    );
    let scorer_bonus = ((stats.points() - CLUTCH_SCORER_THRESHOLD_PPG).max(0.0)
        * CLUTCH_SCORER_BONUS_PER_POINT)
        .min(CLUTCH_SCORER_BONUS_CAP);
    clamp_unit(base + scorer_bonus)
}

/// Attempt rate when volumes are known; otherwise banded on 3P% alone.
fn three_point_tendency(stats: &SeasonStats) -> f64 {
    if let Some(rate) = stats.three_point_attempt_rate() {
        return clamp_unit(rate);
    }
    let three = stats.three_point_pct();
    if three < THREE_TENDENCY_NON_SHOOTER_PCT {
        THREE_TENDENCY_NON_SHOOTER
    } else if three < THREE_TENDENCY_MID_PCT {
        THREE_TENDENCY_LOW
    } else if three < THREE_TENDENCY_HIGH_PCT {
        THREE_TENDENCY_MID
    } else {
        THREE_TENDENCY_HIGH
    }
}

fn defensive_estimates(position: Position, stats: &SeasonStats) -> (f64, f64) {
    let profile = position_profile(position);
    let mut blocks = stats.blocks() * profile.block_scale;
    let mut steals = stats.steals() * profile.steal_scale;
    if position.is_big() {
        blocks += stats.rebounds() * 0.05;
    } else if position.is_guard() {
        steals += stats.assists() * 0.05;
    }
    (non_negative(blocks), non_negative(steals))
}
