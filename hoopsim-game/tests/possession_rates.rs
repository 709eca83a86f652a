use hoopsim_game::{
    ActionType, EnhancedAttributes, GameContext, Participant, PlayerRecord, PossessionOutcome,
    Position, ProbabilityModel, ScoringRules, resolve_possession,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const SAMPLE_SIZE: usize = 20_000;
const TOLERANCE: f64 = 0.02;

fn rate(count: usize) -> f64 {
    let count = u32::try_from(count).expect("count fits");
    let total = u32::try_from(SAMPLE_SIZE).expect("sample size fits u32");
    f64::from(count) / f64::from(total)
}

#[test]
fn resolver_frequencies_track_model_probabilities() {
    let offense =
        EnhancedAttributes::derive(&PlayerRecord::new("o", "Offense", Position::ShootingGuard));
    let defense = EnhancedAttributes::derive(&PlayerRecord::new("d", "Defense", Position::Center));
    let ctx = GameContext {
        offense_score: 2,
        defense_score: 3,
        target_score: 21,
        second_chance: false,
    };
    let probs = ProbabilityModel.possession(
        Participant {
            attributes: &offense,
            fatigue: 0.1,
        },
        Participant {
            attributes: &defense,
            fatigue: 0.1,
        },
        &ctx,
    );
    assert!(!probs.clutch);

    let mut rng = SmallRng::seed_from_u64(2024);
    let mut turnovers = 0usize;
    let mut steals = 0usize;
    let mut trips = 0usize;
    for _ in 0..SAMPLE_SIZE {
        let res = resolve_possession(&probs, ScoringRules::Standard, &mut rng);
        match (res.action, res.outcome) {
            (ActionType::Turnover, PossessionOutcome::Turnover { stolen }) => {
                turnovers += 1;
                if stolen {
                    steals += 1;
                }
            }
            (ActionType::FreeThrowTrip, _) => trips += 1,
            _ => {}
        }
    }

    assert!(
        (rate(turnovers) - probs.turnover).abs() <= TOLERANCE,
        "turnover rate {} vs {}",
        rate(turnovers),
        probs.turnover
    );
    assert!((rate(steals) - probs.steal).abs() <= TOLERANCE);
    assert!((rate(trips) - probs.free_throw_trip).abs() <= TOLERANCE);
}

#[test]
fn fatigue_lowers_make_rate() {
    let shooter =
        EnhancedAttributes::derive(&PlayerRecord::new("s", "Shooter", Position::SmallForward));
    let defender =
        EnhancedAttributes::derive(&PlayerRecord::new("d", "Defender", Position::SmallForward));
    let ctx = GameContext {
        offense_score: 0,
        defense_score: 0,
        target_score: 21,
        second_chance: false,
    };
    let odds = |fatigue: f64| {
        ProbabilityModel.possession(
            Participant {
                attributes: &shooter,
                fatigue,
            },
            Participant {
                attributes: &defender,
                fatigue: 0.0,
            },
            &ctx,
        )
    };
    let fresh = odds(0.0);
    let tired = odds(1.0);
    assert!(tired.two.make < fresh.two.make);
    assert!(tired.three.make < fresh.three.make);
    assert!(tired.free_throw_make < fresh.free_throw_make);
}
