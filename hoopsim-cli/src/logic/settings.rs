use anyhow::{Context, Result};
use hoopsim_game::{MatchConfig, PossessionRule, ScoringRules};
use std::fs;
use std::path::Path;

/// Command-line overrides layered on top of a config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleOverrides {
    pub target: Option<i32>,
    pub win_by: Option<u32>,
    pub make_it_take_it: bool,
    pub streetball: bool,
}

/// Load match rules from an optional JSON file, then apply overrides.
///
/// Validation happens in the engine so that an invalid target surfaces as a
/// simulation failure rather than a usage error.
pub fn resolve_match_config(path: Option<&Path>, overrides: RuleOverrides) -> Result<MatchConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<MatchConfig>(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => MatchConfig::default(),
    };

    if let Some(target) = overrides.target {
        config.target_score = target;
    }
    if let Some(win_by) = overrides.win_by {
        config.win_by = win_by;
    }
    if overrides.make_it_take_it {
        config.possession_rule = PossessionRule::MakeItTakeIt;
    }
    if overrides.streetball {
        config.scoring = ScoringRules::Streetball;
    }
    Ok(config)
}
