pub mod batch;
pub mod reports;
pub mod seeds;
pub mod settings;

pub use batch::{BatchAggregate, MatchRecord, aggregate, run_batch};
pub use reports::ReportInput;
pub use seeds::{expand_iterations, resolve_seed_inputs};
pub use settings::{RuleOverrides, resolve_match_config};
