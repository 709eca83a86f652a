use anyhow::{Result, bail};
use chrono::Utc;

/// Upper bound on seeds produced by a single `a..b` range token.
const MAX_RANGE_SPAN: u64 = 10_000;

/// Resolve CLI seed tokens into concrete seeds.
///
/// Supports literal integers (negative values use their magnitude), inclusive
/// ranges written `a..b`, and the keyword `now` which seeds from the clock.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("now") {
            seeds.push(clock_seed());
            continue;
        }

        if let Some((start, end)) = token.split_once("..") {
            let (Ok(start), Ok(end)) = (start.trim().parse::<u64>(), end.trim().parse::<u64>())
            else {
                bail!("Invalid seed range: {token}");
            };
            if end < start {
                bail!("Seed range {token} is reversed");
            }
            if end - start >= MAX_RANGE_SPAN {
                bail!("Seed range {token} spans more than {MAX_RANGE_SPAN} seeds");
            }
            seeds.extend(start..=end);
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            seeds.push(value.unsigned_abs());
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            seeds.push(value);
            continue;
        }

        bail!("Unrecognized seed input: {token}");
    }

    if seeds.is_empty() {
        bail!("No seeds provided");
    }
    Ok(seeds)
}

/// Expand each base seed into `iterations` consecutive seeds.
#[must_use]
pub fn expand_iterations(seeds: &[u64], iterations: usize) -> Vec<u64> {
    let iterations = u64::try_from(iterations.max(1)).unwrap_or(1);
    seeds
        .iter()
        .flat_map(|seed| (0..iterations).map(move |offset| seed.wrapping_add(offset)))
        .collect()
}

fn clock_seed() -> u64 {
    Utc::now()
        .timestamp_nanos_opt()
        .map_or(0, i64::unsigned_abs)
}
