//! Immutable packaging of a finished matchup.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::attributes::EnhancedAttributes;
use crate::config::MatchConfig;
use crate::constants::{
    TAG_FREE_THROWS, TAG_THREE_BLOCKED, TAG_THREE_MADE, TAG_THREE_MISSED_DEFENSIVE,
    TAG_THREE_MISSED_OFFENSIVE, TAG_TURNOVER_LOOSE, TAG_TURNOVER_STEAL, TAG_TWO_BLOCKED,
    TAG_TWO_MADE, TAG_TWO_MISSED_DEFENSIVE, TAG_TWO_MISSED_OFFENSIVE,
};
use crate::game::GameState;
use crate::numbers::usize_to_f64;
use crate::player::{PlayerId, PlayerRecord};
use crate::possession::{ActionType, FreeThrowSet, PossessionOutcome};
use crate::probability::ShotKind;

/// One of the two seats in a matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

/// Append-only record of a single possession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossessionEvent {
    /// One-based possession number.
    pub index: u32,
    pub side: Side,
    pub possessor: PlayerId,
    pub defender: PlayerId,
    pub action: ActionType,
    pub outcome: PossessionOutcome,
    /// Points added to the possessor's score.
    pub points: u32,
    #[serde(default, skip_serializing_if = "FreeThrowSet::is_empty")]
    pub free_throws: FreeThrowSet,
    /// Stable summary key for downstream commentary.
    pub tag: String,
    pub score_after: [u32; 2],
    pub fatigue_after: [f64; 2],
    pub second_chance: bool,
    pub clutch: bool,
}

/// Summary key for an action and its outcome.
#[must_use]
pub fn summary_tag(action: ActionType, outcome: PossessionOutcome) -> &'static str {
    let kind = action.shot_kind();
    match outcome {
        PossessionOutcome::Turnover { stolen: true } => TAG_TURNOVER_STEAL,
        PossessionOutcome::Turnover { stolen: false } => TAG_TURNOVER_LOOSE,
        PossessionOutcome::FreeThrows { .. } => TAG_FREE_THROWS,
        PossessionOutcome::Made => match kind {
            Some(ShotKind::Three) => TAG_THREE_MADE,
            _ => TAG_TWO_MADE,
        },
        PossessionOutcome::MissedDefensiveRebound => match kind {
            Some(ShotKind::Three) => TAG_THREE_MISSED_DEFENSIVE,
            _ => TAG_TWO_MISSED_DEFENSIVE,
        },
        PossessionOutcome::MissedOffensiveRebound => match kind {
            Some(ShotKind::Three) => TAG_THREE_MISSED_OFFENSIVE,
            _ => TAG_TWO_MISSED_OFFENSIVE,
        },
        PossessionOutcome::Blocked => match kind {
            Some(ShotKind::Three) => TAG_THREE_BLOCKED,
            _ => TAG_TWO_BLOCKED,
        },
    }
}

/// Final points for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub player_id: PlayerId,
    pub name: String,
    pub points: u32,
}

/// Outcome of one simulation run. Never mutated after assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub player1: PlayerRecord,
    pub player2: PlayerRecord,
    pub enhanced_player1: EnhancedAttributes,
    pub enhanced_player2: EnhancedAttributes,
    pub final_score: [ScoreLine; 2],
    pub winner: Side,
    pub game_log: Vec<PossessionEvent>,
    pub possessions: u32,
    pub opening_possessor: Side,
    /// Raw draws consumed, when the random source reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_draws: Option<u64>,
    pub config: MatchConfig,
}

impl SimulationResult {
    /// Package the final state of a run. Copies only; computes nothing new.
    pub(crate) fn assemble(
        players: [&PlayerRecord; 2],
        attributes: [&EnhancedAttributes; 2],
        state: &GameState,
        winner: Side,
        game_log: Vec<PossessionEvent>,
        config: MatchConfig,
    ) -> Self {
        let line = |side: Side| ScoreLine {
            player_id: players[side.index()].id.clone(),
            name: players[side.index()].name.clone(),
            points: state.score(side),
        };
        Self {
            player1: players[0].clone(),
            player2: players[1].clone(),
            enhanced_player1: attributes[0].clone(),
            enhanced_player2: attributes[1].clone(),
            final_score: [line(Side::One), line(Side::Two)],
            winner,
            game_log,
            possessions: state.possession_count(),
            opening_possessor: state.opening_possessor(),
            rng_draws: None,
            config,
        }
    }

    #[must_use]
    pub fn with_rng_draws(mut self, draws: u64) -> Self {
        self.rng_draws = Some(draws);
        self
    }

    #[must_use]
    pub const fn player(&self, side: Side) -> &PlayerRecord {
        match side {
            Side::One => &self.player1,
            Side::Two => &self.player2,
        }
    }

    #[must_use]
    pub const fn attributes(&self, side: Side) -> &EnhancedAttributes {
        match side {
            Side::One => &self.enhanced_player1,
            Side::Two => &self.enhanced_player2,
        }
    }

    #[must_use]
    pub const fn score(&self, side: Side) -> u32 {
        self.final_score[side.index()].points
    }

    #[must_use]
    pub const fn winner_record(&self) -> &PlayerRecord {
        self.player(self.winner)
    }

    #[must_use]
    pub const fn loser(&self) -> Side {
        self.winner.other()
    }

    /// Name to score mapping. Identical display names collapse into one entry,
    /// so prefer `final_score` when names may repeat.
    #[must_use]
    pub fn by_name(&self) -> BTreeMap<String, u32> {
        self.final_score
            .iter()
            .map(|line| (line.name.clone(), line.points))
            .collect()
    }

    /// Field-goal attempts taken by one side.
    #[must_use]
    pub fn field_goal_attempts(&self, side: Side) -> usize {
        self.game_log
            .iter()
            .filter(|event| event.side == side && event.action.shot_kind().is_some())
            .count()
    }

    #[must_use]
    pub fn three_point_attempts(&self, side: Side) -> usize {
        self.game_log
            .iter()
            .filter(|event| event.side == side && event.action == ActionType::ThreePointAttempt)
            .count()
    }

    /// Share of a side's field-goal attempts taken from three; zero without attempts.
    #[must_use]
    pub fn three_point_share(&self, side: Side) -> f64 {
        let attempts = self.field_goal_attempts(side);
        if attempts == 0 {
            return 0.0;
        }
        usize_to_f64(self.three_point_attempts(side)) / usize_to_f64(attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_flips_and_indexes() {
        assert_eq!(Side::One.other(), Side::Two);
        assert_eq!(Side::Two.other().index(), 0);
    }

    #[test]
    fn summary_tags_follow_shot_kind() {
        assert_eq!(
            summary_tag(ActionType::ThreePointAttempt, PossessionOutcome::Made),
            "play.three.made"
        );
        assert_eq!(
            summary_tag(ActionType::TwoPointAttempt, PossessionOutcome::Blocked),
            "play.two.blocked"
        );
        assert_eq!(
            summary_tag(
                ActionType::Turnover,
                PossessionOutcome::Turnover { stolen: true }
            ),
            "play.turnover.steal"
        );
        assert_eq!(
            summary_tag(
                ActionType::FreeThrowTrip,
                PossessionOutcome::FreeThrows {
                    made: 2,
                    attempted: 2
                }
            ),
            "play.free-throws"
        );
    }
}
