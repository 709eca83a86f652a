use rand::RngCore;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::ScoringRules;
use crate::numbers::unit_from_u32;
use crate::probability::{PossessionProbabilities, ShotKind};

/// Free-throw results in shooting order, stored inline.
pub type FreeThrowSet = SmallVec<[bool; 3]>;

/// What the offense tried to do with the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    TwoPointAttempt,
    ThreePointAttempt,
    FreeThrowTrip,
    Turnover,
}

impl ActionType {
    #[must_use]
    pub const fn shot_kind(self) -> Option<ShotKind> {
        match self {
            Self::TwoPointAttempt => Some(ShotKind::Two),
            Self::ThreePointAttempt => Some(ShotKind::Three),
            Self::FreeThrowTrip | Self::Turnover => None,
        }
    }
}

impl From<ShotKind> for ActionType {
    fn from(kind: ShotKind) -> Self {
        match kind {
            ShotKind::Two => Self::TwoPointAttempt,
            ShotKind::Three => Self::ThreePointAttempt,
        }
    }
}

/// How the possession ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PossessionOutcome {
    Made,
    MissedDefensiveRebound,
    MissedOffensiveRebound,
    Blocked,
    Turnover { stolen: bool },
    FreeThrows { made: u8, attempted: u8 },
}

impl PossessionOutcome {
    /// The offense keeps the ball regardless of possession rules.
    #[must_use]
    pub const fn offense_retains(self) -> bool {
        matches!(self, Self::MissedOffensiveRebound)
    }

    /// Points went on the board.
    #[must_use]
    pub const fn scored(self) -> bool {
        match self {
            Self::Made => true,
            Self::FreeThrows { made, .. } => made > 0,
            _ => false,
        }
    }
}

/// Fully resolved possession.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PossessionResolution {
    pub action: ActionType,
    pub outcome: PossessionOutcome,
    pub points: u32,
    pub free_throws: FreeThrowSet,
}

impl PossessionResolution {
    fn new(action: ActionType, outcome: PossessionOutcome, points: u32) -> Self {
        Self {
            action,
            outcome,
            points,
            free_throws: FreeThrowSet::new(),
        }
    }
}

/// Resolve one possession against the injected RNG.
///
/// Each decision is a single uniform draw compared against cumulative
/// thresholds: the action draw (turnover, free-throw trip, three, two), then
/// one draw per free throw, or one shot draw (block, make, miss) followed by
/// one rebound draw on a miss.
#[must_use]
pub fn resolve_possession<R: RngCore>(
    probs: &PossessionProbabilities,
    scoring: ScoringRules,
    rng: &mut R,
) -> PossessionResolution {
    let draw = unit_from_u32(rng.next_u32());

    if draw < probs.turnover {
        let stolen = draw < probs.steal;
        return PossessionResolution::new(
            ActionType::Turnover,
            PossessionOutcome::Turnover { stolen },
            0,
        );
    }

    let trip_threshold = probs.turnover + probs.free_throw_trip;
    if draw < trip_threshold {
        return resolve_free_throws(probs.free_throw_make, scoring, rng);
    }

    let remaining = (1.0 - trip_threshold).max(0.0);
    let three_threshold = remaining.mul_add(probs.three_share, trip_threshold);
    let kind = if draw < three_threshold {
        ShotKind::Three
    } else {
        ShotKind::Two
    };
    resolve_shot(kind, probs, scoring, rng)
}

fn resolve_free_throws<R: RngCore>(
    make_chance: f64,
    scoring: ScoringRules,
    rng: &mut R,
) -> PossessionResolution {
    let attempted = scoring.free_throws_per_trip();
    let free_throws: FreeThrowSet = (0..attempted)
        .map(|_| unit_from_u32(rng.next_u32()) < make_chance)
        .collect();
    let made = u8::try_from(free_throws.iter().filter(|hit| **hit).count()).unwrap_or(u8::MAX);
    PossessionResolution {
        action: ActionType::FreeThrowTrip,
        outcome: PossessionOutcome::FreeThrows { made, attempted },
        points: u32::from(made),
        free_throws,
    }
}

fn resolve_shot<R: RngCore>(
    kind: ShotKind,
    probs: &PossessionProbabilities,
    scoring: ScoringRules,
    rng: &mut R,
) -> PossessionResolution {
    let odds = probs.shot(kind);
    let action = ActionType::from(kind);
    let draw = unit_from_u32(rng.next_u32());

    if draw < odds.block {
        return PossessionResolution::new(action, PossessionOutcome::Blocked, 0);
    }
    let make_threshold = (1.0 - odds.block).mul_add(odds.make, odds.block);
    if draw < make_threshold {
        let points = match kind {
            ShotKind::Two => scoring.two_point_value(),
            ShotKind::Three => scoring.three_point_value(),
        };
        return PossessionResolution::new(action, PossessionOutcome::Made, points);
    }

    let rebound = unit_from_u32(rng.next_u32());
    let outcome = if rebound < probs.offensive_rebound {
        PossessionOutcome::MissedOffensiveRebound
    } else {
        PossessionOutcome::MissedDefensiveRebound
    };
    PossessionResolution::new(action, outcome, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probability::ShotOdds;

    /// Replays a fixed list of raw draws, then repeats the last one.
    struct SeqRng {
        values: Vec<u32>,
        calls: usize,
    }

    impl SeqRng {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                calls: 0,
            }
        }
    }

    impl RngCore for SeqRng {
        fn next_u32(&mut self) -> u32 {
            let idx = self.calls.min(self.values.len() - 1);
            self.calls += 1;
            self.values[idx]
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let value = self.next_u32().to_le_bytes();
            for (idx, byte) in dest.iter_mut().enumerate() {
                *byte = value[idx % value.len()];
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// Raw draw landing at `ratio` of the unit interval.
    fn at(ratio: f64) -> u32 {
        (ratio * f64::from(u32::MAX)) as u32
    }

    fn probs() -> PossessionProbabilities {
        PossessionProbabilities {
            turnover: 0.10,
            steal: 0.04,
            free_throw_trip: 0.10,
            three_share: 0.5,
            two: ShotOdds {
                block: 0.10,
                make: 0.5,
            },
            three: ShotOdds {
                block: 0.0,
                make: 0.4,
            },
            free_throw_make: 0.8,
            offensive_rebound: 0.3,
            clutch: false,
        }
    }

    #[test]
    fn turnover_consumes_single_draw() {
        let mut rng = SeqRng::new(&[at(0.02)]);
        let res = resolve_possession(&probs(), ScoringRules::Standard, &mut rng);
        assert_eq!(res.outcome, PossessionOutcome::Turnover { stolen: true });
        assert_eq!(res.action, ActionType::Turnover);
        assert_eq!(rng.calls, 1, "turnovers must draw exactly once");

        let mut rng = SeqRng::new(&[at(0.07)]);
        let res = resolve_possession(&probs(), ScoringRules::Standard, &mut rng);
        assert_eq!(res.outcome, PossessionOutcome::Turnover { stolen: false });
    }

    #[test]
    fn free_throw_trip_draws_once_per_attempt() {
        let mut rng = SeqRng::new(&[at(0.15), at(0.1), at(0.95)]);
        let res = resolve_possession(&probs(), ScoringRules::Standard, &mut rng);
        assert_eq!(
            res.outcome,
            PossessionOutcome::FreeThrows {
                made: 1,
                attempted: 2
            }
        );
        assert_eq!(res.points, 1);
        assert_eq!(res.free_throws.as_slice(), &[true, false]);
        assert_eq!(rng.calls, 3);

        let mut rng = SeqRng::new(&[at(0.15), at(0.1)]);
        let res = resolve_possession(&probs(), ScoringRules::Streetball, &mut rng);
        assert_eq!(res.free_throws.len(), 1);
        assert_eq!(res.points, 1);
    }

    #[test]
    fn shot_type_follows_three_share() {
        // Field-goal band is [0.2, 1.0); half of it goes to threes.
        let mut rng = SeqRng::new(&[at(0.3), at(0.01)]);
        let res = resolve_possession(&probs(), ScoringRules::Standard, &mut rng);
        assert_eq!(res.action, ActionType::ThreePointAttempt);
        assert_eq!(res.outcome, PossessionOutcome::Made);
        assert_eq!(res.points, 3);

        let mut rng = SeqRng::new(&[at(0.9), at(0.3)]);
        let res = resolve_possession(&probs(), ScoringRules::Streetball, &mut rng);
        assert_eq!(res.action, ActionType::TwoPointAttempt);
        assert_eq!(res.outcome, PossessionOutcome::Made);
        assert_eq!(res.points, 1);
    }

    #[test]
    fn block_precedes_make() {
        let mut rng = SeqRng::new(&[at(0.9), at(0.05)]);
        let res = resolve_possession(&probs(), ScoringRules::Standard, &mut rng);
        assert_eq!(res.outcome, PossessionOutcome::Blocked);
        assert_eq!(res.points, 0);
        assert_eq!(rng.calls, 2, "blocks never roll for a rebound");
    }

    #[test]
    fn misses_roll_for_rebound() {
        let mut rng = SeqRng::new(&[at(0.9), at(0.9), at(0.1)]);
        let res = resolve_possession(&probs(), ScoringRules::Standard, &mut rng);
        assert_eq!(res.outcome, PossessionOutcome::MissedOffensiveRebound);
        assert!(res.outcome.offense_retains());
        assert_eq!(rng.calls, 3);

        let mut rng = SeqRng::new(&[at(0.9), at(0.9), at(0.8)]);
        let res = resolve_possession(&probs(), ScoringRules::Standard, &mut rng);
        assert_eq!(res.outcome, PossessionOutcome::MissedDefensiveRebound);
        assert!(!res.outcome.scored());
    }

    #[test]
    fn zero_three_share_never_shoots_threes() {
        let mut p = probs();
        p.three_share = 0.0;
        for step in 0..50u32 {
            let ratio = 0.2 + f64::from(step) * 0.015;
            let mut rng = SeqRng::new(&[at(ratio), at(0.99)]);
            let res = resolve_possession(&p, ScoringRules::Standard, &mut rng);
            assert_ne!(res.action, ActionType::ThreePointAttempt);
        }
    }
}
