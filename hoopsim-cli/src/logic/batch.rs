use anyhow::{Context, Result};
use hoopsim_game::numbers::{u64_to_f64, usize_to_f64};
use hoopsim_game::{MatchEngine, PlayerId, Roster, Side, SimulationResult};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One seeded matchup.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub seed: u64,
    pub result: SimulationResult,
}

impl MatchRecord {
    #[must_use]
    pub fn winner_name(&self) -> &str {
        &self.result.winner_record().name
    }
}

/// Totals across a batch of seeded matchups.
#[derive(Debug, Clone, Serialize)]
pub struct BatchAggregate {
    pub names: [String; 2],
    pub matchups: usize,
    pub wins: [usize; 2],
    pub win_share: [f64; 2],
    pub mean_score: [f64; 2],
    pub mean_possessions: f64,
    pub three_point_share: [f64; 2],
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Run every seed on its own blocking task. Each run owns its RNG; the
/// engine's attribute cache is the only shared state.
pub async fn run_batch(
    engine: Arc<MatchEngine<Roster>>,
    player1: &PlayerId,
    player2: &PlayerId,
    seeds: &[u64],
) -> Result<(Vec<MatchRecord>, Duration)> {
    let start = Instant::now();
    let handles: Vec<_> = seeds
        .iter()
        .map(|&seed| {
            let engine = Arc::clone(&engine);
            let player1 = player1.clone();
            let player2 = player2.clone();
            tokio::task::spawn_blocking(move || {
                engine
                    .simulate(&player1, &player2, seed)
                    .map(|result| MatchRecord { seed, result })
            })
        })
        .collect();

    let mut records = Vec::with_capacity(handles.len());
    for handle in handles {
        let record = handle.await.context("simulation task panicked")??;
        log::debug!(
            "seed {} finished after {} possessions",
            record.seed,
            record.result.possessions
        );
        records.push(record);
    }
    Ok((records, start.elapsed()))
}

/// Summarize a batch. Returns `None` for an empty batch.
#[must_use]
pub fn aggregate(records: &[MatchRecord], elapsed: Duration) -> Option<BatchAggregate> {
    let first = records.first()?;
    let matchups = usize_to_f64(records.len());

    let mut wins = [0usize; 2];
    let mut points = [0u64; 2];
    let mut possessions = 0u64;
    let mut threes = [0usize; 2];
    let mut attempts = [0usize; 2];
    for record in records {
        let result = &record.result;
        wins[result.winner.index()] += 1;
        possessions += u64::from(result.possessions);
        for side in [Side::One, Side::Two] {
            let idx = side.index();
            points[idx] += u64::from(result.score(side));
            attempts[idx] += result.field_goal_attempts(side);
            threes[idx] += result.three_point_attempts(side);
        }
    }

    let share = |part: usize, whole: usize| {
        if whole == 0 {
            0.0
        } else {
            usize_to_f64(part) / usize_to_f64(whole)
        }
    };
    let mean = |total: u64| u64_to_f64(total) / matchups;

    Some(BatchAggregate {
        names: [
            first.result.player1.name.clone(),
            first.result.player2.name.clone(),
        ],
        matchups: records.len(),
        wins,
        win_share: [share(wins[0], records.len()), share(wins[1], records.len())],
        mean_score: [mean(points[0]), mean(points[1])],
        mean_possessions: mean(possessions),
        three_point_share: [share(threes[0], attempts[0]), share(threes[1], attempts[1])],
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoopsim_game::{PlayerRecord, Position};

    fn engine() -> Arc<MatchEngine<Roster>> {
        Arc::new(MatchEngine::new(Roster::new(vec![
            PlayerRecord::new("1", "Ace", Position::ShootingGuard),
            PlayerRecord::new("2", "Big", Position::Center),
        ])))
    }

    #[tokio::test]
    async fn batch_runs_each_seed_once() {
        let seeds = [1, 2, 3, 4];
        let (records, _) = run_batch(engine(), &PlayerId::new("1"), &PlayerId::new("2"), &seeds)
            .await
            .unwrap();
        let ran: Vec<u64> = records.iter().map(|r| r.seed).collect();
        assert_eq!(ran, seeds);

        let summary = aggregate(&records, Duration::ZERO).unwrap();
        assert_eq!(summary.matchups, 4);
        assert_eq!(summary.wins[0] + summary.wins[1], 4);
        assert!((summary.win_share[0] + summary.win_share[1] - 1.0).abs() < 1e-9);
        assert!(summary.mean_possessions > 0.0);
        assert_eq!(summary.names, ["Ace".to_string(), "Big".to_string()]);
    }

    #[tokio::test]
    async fn batch_is_reproducible() {
        let seeds = [11, 12];
        let p1 = PlayerId::new("1");
        let p2 = PlayerId::new("2");
        let (first, _) = run_batch(engine(), &p1, &p2, &seeds).await.unwrap();
        let (second, _) = run_batch(engine(), &p1, &p2, &seeds).await.unwrap();
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.result, b.result);
        }
    }

    #[tokio::test]
    async fn unknown_player_fails_the_batch() {
        let err = run_batch(engine(), &PlayerId::new("1"), &PlayerId::new("99"), &[1])
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<hoopsim_game::SimError>().is_some());
    }

    #[tokio::test]
    async fn aggregate_pools_totals_across_seeds() {
        let seeds = [5, 6, 7];
        let (records, _) = run_batch(engine(), &PlayerId::new("1"), &PlayerId::new("2"), &seeds)
            .await
            .unwrap();
        let summary = aggregate(&records, Duration::ZERO).unwrap();

        let points: u32 = records.iter().map(|r| r.result.score(Side::One)).sum();
        let expected_mean = f64::from(points) / 3.0;
        assert!((summary.mean_score[0] - expected_mean).abs() < 1e-9);

        let threes: usize = records
            .iter()
            .map(|r| r.result.three_point_attempts(Side::Two))
            .sum();
        let attempts: usize = records
            .iter()
            .map(|r| r.result.field_goal_attempts(Side::Two))
            .sum();
        let expected_share = if attempts == 0 {
            0.0
        } else {
            usize_to_f64(threes) / usize_to_f64(attempts)
        };
        assert!((summary.three_point_share[1] - expected_share).abs() < 1e-9);
    }

    #[test]
    fn empty_batch_has_no_aggregate() {
        assert!(aggregate(&[], Duration::ZERO).is_none());
    }
}
