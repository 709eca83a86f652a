//! Hoopsim Game Engine
//!
//! Platform-agnostic one-on-one basketball simulation: attribute derivation,
//! per-possession probabilities and a seeded game state machine. No I/O beyond
//! the commentary boundary.

pub mod attributes;
pub mod cache;
pub mod commentary;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod numbers;
pub mod player;
pub mod possession;
pub mod probability;
pub mod result;
pub mod rng;
pub mod roster;

use std::sync::atomic::{AtomicBool, Ordering};

// Re-export commonly used types
pub use attributes::EnhancedAttributes;
pub use cache::AttributeCache;
pub use commentary::{
    Commentary, CommentaryPrompt, CommentarySource, Commentator, TemplateCommentator, narrate,
    template_summary,
};
pub use config::{ConfigError, MatchConfig, PossessionRule, ScoringRules};
pub use error::{SIMULATION_UNAVAILABLE, SimError};
pub use game::{
    Contestant, GameState, play_matchup, simulate, simulate_with_cancel, simulate_with_config,
};
pub use player::{PlayerId, PlayerRecord, Position, SeasonStats, parse_height};
pub use possession::{ActionType, FreeThrowSet, PossessionOutcome, resolve_possession};
pub use probability::{
    GameContext, Participant, PossessionProbabilities, ProbabilityModel, ShotKind,
};
pub use result::{PossessionEvent, ScoreLine, Side, SimulationResult};
pub use rng::{CountingRng, MatchRng};
pub use roster::{PlayerSource, Roster};

/// Engine façade resolving players from a source and running seeded matchups.
pub struct MatchEngine<P>
where
    P: PlayerSource,
{
    source: P,
    cache: AttributeCache,
    config: MatchConfig,
}

impl<P> MatchEngine<P>
where
    P: PlayerSource,
{
    /// Create an engine over `source` with default match rules.
    pub fn new(source: P) -> Self {
        Self::with_config(source, MatchConfig::default())
    }

    pub fn with_config(source: P, config: MatchConfig) -> Self {
        Self {
            source,
            cache: AttributeCache::new(),
            config,
        }
    }

    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub const fn source(&self) -> &P {
        &self.source
    }

    pub const fn cache(&self) -> &AttributeCache {
        &self.cache
    }

    /// Resolve a player by id.
    ///
    /// # Errors
    ///
    /// Returns the source's error, or `SimError::InvalidPlayer` when no player
    /// carries `id`.
    pub fn resolve(&self, id: &PlayerId) -> Result<PlayerRecord, anyhow::Error>
    where
        P::Error: Into<anyhow::Error>,
    {
        self.source
            .player(id)
            .map_err(Into::into)?
            .ok_or_else(|| SimError::invalid_player(id.as_str(), "no player with this id").into())
    }

    /// Simulate two players by id with a stream derived from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if either player cannot be resolved or the run fails.
    pub fn simulate(
        &self,
        player1: &PlayerId,
        player2: &PlayerId,
        seed: u64,
    ) -> Result<SimulationResult, anyhow::Error>
    where
        P::Error: Into<anyhow::Error>,
    {
        self.simulate_with_cancel(player1, player2, seed, &AtomicBool::new(false))
    }

    /// Like [`MatchEngine::simulate`], aborting once `cancel` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if either player cannot be resolved or the run fails.
    pub fn simulate_with_cancel(
        &self,
        player1: &PlayerId,
        player2: &PlayerId,
        seed: u64,
        cancel: &AtomicBool,
    ) -> Result<SimulationResult, anyhow::Error>
    where
        P::Error: Into<anyhow::Error>,
    {
        let record1 = self.resolve(player1)?;
        let record2 = self.resolve(player2)?;
        for record in [&record1, &record2] {
            if !record.is_well_formed() {
                return Err(
                    SimError::invalid_player(record.id.as_str(), "record is missing a name").into(),
                );
            }
        }
        if cancel.load(Ordering::Relaxed) {
            return Err(SimError::Cancelled { possessions: 0 }.into());
        }

        let attributes1 = self.cache.get_or_derive(&record1);
        let attributes2 = self.cache.get_or_derive(&record2);
        let mut rng = MatchRng::from_user_seed(seed);
        let result = play_matchup(
            Contestant {
                record: &record1,
                attributes: &attributes1,
            },
            Contestant {
                record: &record2,
                attributes: &attributes2,
            },
            &self.config,
            &mut rng,
            cancel,
        )?;
        Ok(result.with_rng_draws(rng.draws()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, thiserror::Error)]
    #[error("store offline")]
    struct StoreOffline;

    #[derive(Default)]
    struct MockSource {
        players: HashMap<PlayerId, PlayerRecord>,
        lookups: RefCell<Vec<String>>,
        offline: bool,
    }

    impl MockSource {
        fn with_pair() -> Self {
            let mut players = HashMap::new();
            for record in [
                PlayerRecord::new("a", "Alpha", Position::PointGuard),
                PlayerRecord::new("b", "Beta", Position::PowerForward),
            ] {
                players.insert(record.id.clone(), record);
            }
            Self {
                players,
                ..Self::default()
            }
        }
    }

    impl PlayerSource for MockSource {
        type Error = StoreOffline;

        fn player(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, StoreOffline> {
            self.lookups.borrow_mut().push(id.to_string());
            if self.offline {
                return Err(StoreOffline);
            }
            Ok(self.players.get(id).cloned())
        }
    }

    #[test]
    fn engine_resolves_and_replays_by_seed() {
        let engine = MatchEngine::new(MockSource::with_pair());
        let a = PlayerId::new("a");
        let b = PlayerId::new("b");
        let first = engine.simulate(&a, &b, 99).expect("matchup runs");
        let second = engine.simulate(&a, &b, 99).expect("matchup runs");
        assert_eq!(first, second);
        assert!(first.rng_draws.is_some_and(|draws| draws > 0));
        assert_eq!(engine.cache().len(), 2);
        assert_eq!(engine.source().lookups.borrow().len(), 4);
    }

    #[test]
    fn unknown_id_is_invalid_player() {
        let engine = MatchEngine::new(MockSource::with_pair());
        let err = engine
            .simulate(&PlayerId::new("a"), &PlayerId::new("zz"), 1)
            .unwrap_err();
        let sim = err.downcast_ref::<SimError>().expect("sim error");
        assert!(matches!(sim, SimError::InvalidPlayer { id, .. } if id == "zz"));
        assert_eq!(sim.user_message(), SIMULATION_UNAVAILABLE);
    }

    #[test]
    fn source_errors_propagate() {
        let source = MockSource {
            offline: true,
            ..MockSource::with_pair()
        };
        let engine = MatchEngine::new(source);
        let err = engine
            .simulate(&PlayerId::new("a"), &PlayerId::new("b"), 1)
            .unwrap_err();
        assert!(err.downcast_ref::<StoreOffline>().is_some());
    }

    #[test]
    fn engine_config_is_validated() {
        let engine =
            MatchEngine::with_config(MockSource::with_pair(), MatchConfig::with_target(-3));
        assert_eq!(engine.config().target_score, -3);
        let err = engine
            .simulate(&PlayerId::new("a"), &PlayerId::new("b"), 1)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SimError>(),
            Some(SimError::Configuration(ConfigError::NonPositiveTarget { value: -3 }))
        ));
    }
}
