//! Per-possession event probabilities.
//!
//! Everything here is a total function over bounded inputs: every returned
//! probability is clamped into [0, 1] before the resolver sees it.
use serde::{Deserialize, Serialize};

use crate::attributes::EnhancedAttributes;
use crate::constants::{
    BLOCK_INSIDE_MULTIPLIER, BLOCK_MAX, BLOCK_PER_BLOCK, CLUTCH_MARGIN, CLUTCH_SWING,
    CLUTCH_WINDOW_DIVISOR, CLUTCH_WINDOW_MIN, CONTEST_HEIGHT_MAX, CONTEST_HEIGHT_MIN,
    CONTEST_HEIGHT_PER_INCH, CONTEST_IMPACT_WEIGHT, CONTEST_POSITION_BONUS,
    FATIGUE_FREE_THROW_PENALTY, FATIGUE_SHOT_PENALTY, FREE_THROW_MAKE_MAX, FREE_THROW_TRIP_BASE,
    FREE_THROW_TRIP_MAX, FREE_THROW_TRIP_USAGE_WEIGHT, MAKE_MAX, MAKE_MIN,
    OFFENSIVE_REBOUND_DEFENCE_WEIGHT, OFFENSIVE_REBOUND_MAX, OFFENSIVE_REBOUND_MIN,
    OFFENSIVE_REBOUND_PER_INCH, STEAL_PRESSURE_PER_STEAL, TURNOVER_BASE, TURNOVER_MAX,
    TURNOVER_MIN, TURNOVER_SECURITY_PIVOT,
};
use crate::numbers::clamp_unit;

/// Attempt taken from the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotKind {
    Two,
    Three,
}

/// One side of the matchup as the model sees it for a single possession.
#[derive(Debug, Clone, Copy)]
pub struct Participant<'a> {
    pub attributes: &'a EnhancedAttributes,
    /// Current fatigue in [0, 1].
    pub fatigue: f64,
}

/// Score situation for the possession about to be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameContext {
    pub offense_score: u32,
    pub defense_score: u32,
    pub target_score: u32,
    /// The offense kept the ball on an offensive rebound last possession.
    pub second_chance: bool,
}

impl GameContext {
    /// Close game with the leader within reach of the target.
    #[must_use]
    pub fn is_clutch(&self) -> bool {
        let gap = self.offense_score.abs_diff(self.defense_score);
        if gap > CLUTCH_MARGIN {
            return false;
        }
        let target = i64::from(self.target_score);
        let window = (target / CLUTCH_WINDOW_DIVISOR).max(CLUTCH_WINDOW_MIN);
        let leader = i64::from(self.offense_score.max(self.defense_score));
        leader + window >= target
    }
}

/// Block and make chances for one shot kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotOdds {
    pub block: f64,
    pub make: f64,
}

/// Everything the resolver needs for one possession.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PossessionProbabilities {
    /// Total turnover chance, steals included.
    pub turnover: f64,
    /// Portion of `turnover` credited to the defender as a steal.
    pub steal: f64,
    pub free_throw_trip: f64,
    /// Share of field-goal attempts taken from three.
    pub three_share: f64,
    pub two: ShotOdds,
    pub three: ShotOdds,
    pub free_throw_make: f64,
    pub offensive_rebound: f64,
    pub clutch: bool,
}

impl PossessionProbabilities {
    #[must_use]
    pub const fn shot(&self, kind: ShotKind) -> ShotOdds {
        match kind {
            ShotKind::Two => self.two,
            ShotKind::Three => self.three,
        }
    }
}

/// Stateless model turning two participants and the score into probabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilityModel;

impl ProbabilityModel {
    #[must_use]
    pub fn possession(
        self,
        offense: Participant<'_>,
        defense: Participant<'_>,
        ctx: &GameContext,
    ) -> PossessionProbabilities {
        let clutch = ctx.is_clutch();
        let steal = clamp_unit(defense.attributes.estimated_steals * STEAL_PRESSURE_PER_STEAL);
        let turnover = (TURNOVER_BASE
            * (TURNOVER_SECURITY_PIVOT - offense.attributes.ball_security)
            + steal)
            .clamp(TURNOVER_MIN, TURNOVER_MAX);

        PossessionProbabilities {
            turnover,
            steal: steal.min(turnover),
            free_throw_trip: free_throw_trip_chance(offense.attributes),
            three_share: clamp_unit(offense.attributes.three_point_tendency),
            two: self.shot_odds(ShotKind::Two, offense, defense, clutch),
            three: self.shot_odds(ShotKind::Three, offense, defense, clutch),
            free_throw_make: free_throw_make_chance(offense, clutch),
            offensive_rebound: if ctx.second_chance {
                0.0
            } else {
                offensive_rebound_chance(offense.attributes, defense.attributes)
            },
            clutch,
        }
    }

    /// Base efficiency × (1 − fatigue penalty) × clutch multiplier, less the
    /// defender's contest.
    #[must_use]
    pub fn shot_odds(
        self,
        kind: ShotKind,
        offense: Participant<'_>,
        defense: Participant<'_>,
        clutch: bool,
    ) -> ShotOdds {
        let shooter = offense.attributes;
        let defender = defense.attributes;

        let split = match kind {
            ShotKind::Two => shooter.field_goal_pct,
            ShotKind::Three => shooter.three_point_pct,
        };
        let efficiency = 0.5f64.mul_add(shooter.scoring_efficiency, 0.5).clamp(0.5, 1.5);
        let base = split * efficiency - contest(kind, shooter, defender);
        let fatigue = 1.0 - FATIGUE_SHOT_PENALTY * clamp_unit(offense.fatigue);
        let make = (base * fatigue * clutch_multiplier(shooter, clutch)).clamp(MAKE_MIN, MAKE_MAX);

        let mut block = (defender.estimated_blocks * BLOCK_PER_BLOCK).min(BLOCK_MAX);
        if kind == ShotKind::Two {
            block *= BLOCK_INSIDE_MULTIPLIER;
        }
        ShotOdds {
            block: clamp_unit(block),
            make,
        }
    }
}

fn contest(kind: ShotKind, shooter: &EnhancedAttributes, defender: &EnhancedAttributes) -> f64 {
    let height_diff = f64::from(defender.height_inches) - f64::from(shooter.height_inches);
    let height =
        (height_diff * CONTEST_HEIGHT_PER_INCH).clamp(CONTEST_HEIGHT_MIN, CONTEST_HEIGHT_MAX);
    let position = match kind {
        ShotKind::Two if defender.position.is_big() => CONTEST_POSITION_BONUS,
        ShotKind::Three if defender.position.is_wing() => CONTEST_POSITION_BONUS,
        _ => 0.0,
    };
    defender.defensive_impact.mul_add(CONTEST_IMPACT_WEIGHT, height + position)
}

fn clutch_multiplier(shooter: &EnhancedAttributes, clutch: bool) -> f64 {
    if clutch {
        (shooter.clutch_rating - 0.5).mul_add(CLUTCH_SWING, 1.0)
    } else {
        1.0
    }
}

fn free_throw_trip_chance(offense: &EnhancedAttributes) -> f64 {
    let inside_usage = offense.usage_rate * (1.0 - offense.three_point_tendency);
    FREE_THROW_TRIP_USAGE_WEIGHT
        .mul_add(inside_usage, FREE_THROW_TRIP_BASE)
        .clamp(0.0, FREE_THROW_TRIP_MAX)
}

fn free_throw_make_chance(offense: Participant<'_>, clutch: bool) -> f64 {
    let shooter = offense.attributes;
    let fatigue = 1.0 - FATIGUE_FREE_THROW_PENALTY * clamp_unit(offense.fatigue);
    (shooter.free_throw_pct * fatigue * clutch_multiplier(shooter, clutch))
        .clamp(MAKE_MIN, FREE_THROW_MAKE_MAX)
}

fn offensive_rebound_chance(offense: &EnhancedAttributes, defense: &EnhancedAttributes) -> f64 {
    let weighted_defence = defense.defensive_rebounding * OFFENSIVE_REBOUND_DEFENCE_WEIGHT;
    let total = offense.offensive_rebounding + weighted_defence;
    let share = if total <= f64::EPSILON {
        OFFENSIVE_REBOUND_MIN
    } else {
        offense.offensive_rebounding / total
    };
    let height_edge = f64::from(offense.height_inches) - f64::from(defense.height_inches);
    height_edge
        .mul_add(OFFENSIVE_REBOUND_PER_INCH, share)
        .clamp(OFFENSIVE_REBOUND_MIN, OFFENSIVE_REBOUND_MAX)
}
