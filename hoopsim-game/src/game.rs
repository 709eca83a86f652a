//! Possession-by-possession game state machine.
//!
//! A run owns exactly one `GameState` and one random source. State only
//! changes at possession boundaries, so cancelling between possessions never
//! leaves a half-applied update behind.
use log::{debug, info};
use rand::RngCore;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::attributes::EnhancedAttributes;
use crate::config::{MatchConfig, PossessionRule};
use crate::constants::{FATIGUE_PER_POSSESSION, STAMINA_RELIEF};
use crate::error::SimError;
use crate::numbers::unit_from_u32;
use crate::player::PlayerRecord;
use crate::possession::{PossessionOutcome, PossessionResolution, resolve_possession};
use crate::probability::{GameContext, Participant, ProbabilityModel};
use crate::result::{PossessionEvent, Side, SimulationResult, summary_tag};

/// Authoritative mutable state of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    scores: [u32; 2],
    fatigue: [f64; 2],
    possession_count: u32,
    possessor: Side,
    opening_possessor: Side,
    target_score: u32,
    second_chance: bool,
}

impl GameState {
    #[must_use]
    pub const fn new(opening_possessor: Side, target_score: u32) -> Self {
        Self {
            scores: [0; 2],
            fatigue: [0.0; 2],
            possession_count: 0,
            possessor: opening_possessor,
            opening_possessor,
            target_score,
            second_chance: false,
        }
    }

    #[must_use]
    pub const fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    #[must_use]
    pub const fn fatigue(&self, side: Side) -> f64 {
        self.fatigue[side.index()]
    }

    #[must_use]
    pub const fn possession_count(&self) -> u32 {
        self.possession_count
    }

    #[must_use]
    pub const fn possessor(&self) -> Side {
        self.possessor
    }

    #[must_use]
    pub const fn opening_possessor(&self) -> Side {
        self.opening_possessor
    }

    #[must_use]
    pub const fn second_chance(&self) -> bool {
        self.second_chance
    }

    /// Side at or above target with a lead of at least `win_by`, if any.
    #[must_use]
    pub const fn winner(&self, win_by: u32) -> Option<Side> {
        let one = self.scores[0];
        let two = self.scores[1];
        if one >= self.target_score && one >= two.saturating_add(win_by) {
            Some(Side::One)
        } else if two >= self.target_score && two >= one.saturating_add(win_by) {
            Some(Side::Two)
        } else {
            None
        }
    }

    fn context(&self) -> GameContext {
        let offense = self.possessor;
        GameContext {
            offense_score: self.score(offense),
            defense_score: self.score(offense.other()),
            target_score: self.target_score,
            second_chance: self.second_chance,
        }
    }

    fn record_possession(&mut self, points: u32, stamina: [f64; 2]) {
        let idx = self.possessor.index();
        self.scores[idx] = self.scores[idx].saturating_add(points);
        self.possession_count = self.possession_count.saturating_add(1);

        let elapsed = f64::from(self.possession_count) * FATIGUE_PER_POSSESSION;
        for (fatigue, stamina) in self.fatigue.iter_mut().zip(stamina) {
            let relief = 1.0 - STAMINA_RELIEF * stamina.clamp(0.0, 1.0);
            *fatigue = fatigue.max((elapsed * relief).min(1.0));
        }
    }

    /// Hand the ball to whoever plays the next possession.
    fn advance(&mut self, outcome: PossessionOutcome, rule: PossessionRule) {
        let offense_keeps = match outcome {
            PossessionOutcome::MissedOffensiveRebound => true,
            PossessionOutcome::Made | PossessionOutcome::FreeThrows { .. } => {
                rule == PossessionRule::MakeItTakeIt && outcome.scored()
            }
            PossessionOutcome::MissedDefensiveRebound
            | PossessionOutcome::Blocked
            | PossessionOutcome::Turnover { .. } => false,
        };
        self.second_chance = outcome.offense_retains();
        if !offense_keeps {
            self.possessor = self.possessor.other();
        }
    }
}

/// A player and the attributes the run will use for them.
#[derive(Debug, Clone, Copy)]
pub struct Contestant<'a> {
    pub record: &'a PlayerRecord,
    pub attributes: &'a EnhancedAttributes,
}

/// Simulate a matchup to `target_score` under default rules.
///
/// # Errors
///
/// Returns `SimError::Configuration` for a non-positive target,
/// `SimError::InvalidPlayer` for a record without id or name, and
/// `SimError::Diverged` when the possession cap is hit.
pub fn simulate<R: RngCore>(
    player1: &PlayerRecord,
    player2: &PlayerRecord,
    target_score: i32,
    rng: &mut R,
) -> Result<SimulationResult, SimError> {
    simulate_with_config(player1, player2, &MatchConfig::with_target(target_score), rng)
}

/// Simulate a matchup under explicit rules.
///
/// # Errors
///
/// See [`simulate`].
pub fn simulate_with_config<R: RngCore>(
    player1: &PlayerRecord,
    player2: &PlayerRecord,
    config: &MatchConfig,
    rng: &mut R,
) -> Result<SimulationResult, SimError> {
    simulate_with_cancel(player1, player2, config, rng, &AtomicBool::new(false))
}

/// Simulate a matchup, aborting between possessions once `cancel` is set.
///
/// # Errors
///
/// See [`simulate`]; additionally returns `SimError::Cancelled`.
pub fn simulate_with_cancel<R: RngCore>(
    player1: &PlayerRecord,
    player2: &PlayerRecord,
    config: &MatchConfig,
    rng: &mut R,
    cancel: &AtomicBool,
) -> Result<SimulationResult, SimError> {
    ensure_well_formed(player1)?;
    ensure_well_formed(player2)?;
    let attributes1 = EnhancedAttributes::derive(player1);
    let attributes2 = EnhancedAttributes::derive(player2);
    play_matchup(
        Contestant {
            record: player1,
            attributes: &attributes1,
        },
        Contestant {
            record: player2,
            attributes: &attributes2,
        },
        config,
        rng,
        cancel,
    )
}

fn ensure_well_formed(player: &PlayerRecord) -> Result<(), SimError> {
    if player.is_well_formed() {
        Ok(())
    } else {
        Err(SimError::invalid_player(
            player.id.as_str(),
            "record is missing an id or name",
        ))
    }
}

/// Run the state machine over already-derived attributes.
///
/// # Errors
///
/// See [`simulate_with_cancel`].
pub fn play_matchup<R: RngCore>(
    player1: Contestant<'_>,
    player2: Contestant<'_>,
    config: &MatchConfig,
    rng: &mut R,
    cancel: &AtomicBool,
) -> Result<SimulationResult, SimError> {
    config.validate()?;
    let contestants = [player1, player2];
    let stamina = [player1.attributes.stamina, player2.attributes.stamina];
    let model = ProbabilityModel;

    let opening = if unit_from_u32(rng.next_u32()) < 0.5 {
        Side::One
    } else {
        Side::Two
    };
    let mut state = GameState::new(opening, config.target());
    let mut game_log = Vec::new();
    info!(
        "tip-off {} vs {} to {} (win by {}), {} has the ball",
        player1.record.name,
        player2.record.name,
        config.target_score,
        config.win_by,
        contestants[opening.index()].record.name
    );

    let winner = loop {
        if let Some(winner) = state.winner(config.win_by) {
            break winner;
        }
        if cancel.load(Ordering::Relaxed) {
            return Err(SimError::Cancelled {
                possessions: state.possession_count(),
            });
        }
        if state.possession_count() >= config.possession_cap {
            return Err(SimError::Diverged {
                possessions: state.possession_count(),
                score1: state.score(Side::One),
                score2: state.score(Side::Two),
            });
        }

        let offense = state.possessor();
        let defense = offense.other();
        let ctx = state.context();
        let probs = model.possession(
            Participant {
                attributes: contestants[offense.index()].attributes,
                fatigue: state.fatigue(offense),
            },
            Participant {
                attributes: contestants[defense.index()].attributes,
                fatigue: state.fatigue(defense),
            },
            &ctx,
        );
        let resolution = resolve_possession(&probs, config.scoring, rng);
        state.record_possession(resolution.points, stamina);

        let event = possession_event(&state, &contestants, &ctx, probs.clutch, resolution);
        debug!(
            "#{} {} {} -> {}-{}",
            event.index,
            event.possessor,
            event.tag,
            event.score_after[0],
            event.score_after[1]
        );
        state.advance(event.outcome, config.possession_rule);
        game_log.push(event);
    };

    info!(
        "final {} {} - {} {} after {} possessions",
        player1.record.name,
        state.score(Side::One),
        state.score(Side::Two),
        player2.record.name,
        state.possession_count()
    );
    Ok(SimulationResult::assemble(
        [player1.record, player2.record],
        [player1.attributes, player2.attributes],
        &state,
        winner,
        game_log,
        *config,
    ))
}

fn possession_event(
    state: &GameState,
    contestants: &[Contestant<'_>; 2],
    ctx: &GameContext,
    clutch: bool,
    resolution: PossessionResolution,
) -> PossessionEvent {
    let side = state.possessor();
    PossessionEvent {
        index: state.possession_count(),
        side,
        possessor: contestants[side.index()].record.id.clone(),
        defender: contestants[side.other().index()].record.id.clone(),
        action: resolution.action,
        outcome: resolution.outcome,
        points: resolution.points,
        tag: summary_tag(resolution.action, resolution.outcome).to_string(),
        free_throws: resolution.free_throws,
        score_after: [state.score(Side::One), state.score(Side::Two)],
        fatigue_after: [state.fatigue(Side::One), state.fatigue(Side::Two)],
        second_chance: ctx.second_chance,
        clutch,
    }
}
