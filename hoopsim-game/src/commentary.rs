//! Boundary to the external prose generator.
//!
//! The engine hands a finished `SimulationResult` to a `Commentator`. Any
//! failure is absorbed here and replaced with a deterministic template, so a
//! numeric result is never held back by text generation.
use log::warn;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::Write as _;

use crate::config::{PossessionRule, ScoringRules};
use crate::result::SimulationResult;

/// Black-box prose generator.
pub trait Commentator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produce commentary for a finished matchup.
    ///
    /// # Errors
    ///
    /// Returns an error if the generator is unreachable or rejects the request.
    fn generate_commentary(&self, result: &SimulationResult) -> Result<String, Self::Error>;

    /// Provenance recorded for text this commentator produces.
    fn source(&self) -> CommentarySource {
        CommentarySource::Generated
    }
}

/// Deterministic one-line recap.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCommentator;

impl Commentator for TemplateCommentator {
    type Error = Infallible;

    fn generate_commentary(&self, result: &SimulationResult) -> Result<String, Self::Error> {
        Ok(template_summary(result))
    }

    fn source(&self) -> CommentarySource {
        CommentarySource::Template
    }
}

/// `"{winner} wins {winner_points}-{loser_points} over {loser}"`.
#[must_use]
pub fn template_summary(result: &SimulationResult) -> String {
    let winner = result.winner;
    let loser = result.loser();
    format!(
        "{} wins {}-{} over {}",
        result.player(winner).name,
        result.score(winner),
        result.score(loser),
        result.player(loser).name
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentarySource {
    Generated,
    Template,
}

/// Prose attached to a result, with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commentary {
    pub text: String,
    pub source: CommentarySource,
}

/// Ask `commentator` for prose, substituting the template on error or empty text.
pub fn narrate<C: Commentator>(commentator: &C, result: &SimulationResult) -> Commentary {
    match commentator.generate_commentary(result) {
        Ok(text) if !text.trim().is_empty() => Commentary {
            text,
            source: commentator.source(),
        },
        Ok(_) => {
            warn!("commentary generator returned empty text; using template");
            template_commentary(result)
        }
        Err(err) => {
            warn!("commentary generator failed: {err}; using template");
            template_commentary(result)
        }
    }
}

fn template_commentary(result: &SimulationResult) -> Commentary {
    Commentary {
        text: template_summary(result),
        source: CommentarySource::Template,
    }
}

/// Broadcast request handed to a text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryPrompt {
    pub instructions: String,
    pub players: [String; 2],
    pub rules: Vec<String>,
    pub plays: Vec<String>,
    pub final_summary: String,
}

impl CommentaryPrompt {
    /// Build the request from a finished result.
    ///
    /// # Errors
    ///
    /// Returns an error if a player record cannot be serialized.
    pub fn from_result(result: &SimulationResult) -> Result<Self, serde_json::Error> {
        let players = [
            serde_json::to_string_pretty(&result.player1)?,
            serde_json::to_string_pretty(&result.player2)?,
        ];

        let config = &result.config;
        let (inside, outside) = match config.scoring {
            ScoringRules::Standard => ("2 points", "3 points"),
            ScoringRules::Streetball => ("1 point", "2 points"),
        };
        let rules = vec![
            format!(
                "First to {} points, winning by at least {}",
                config.target_score, config.win_by
            ),
            format!("Shots inside the arc are worth {inside}, shots beyond it {outside}"),
            match config.possession_rule {
                PossessionRule::Alternate => "Possession alternates after a score".to_string(),
                PossessionRule::MakeItTakeIt => {
                    "Make it, take it: the scorer keeps the ball".to_string()
                }
            },
        ];

        let plays = result
            .game_log
            .iter()
            .map(|event| {
                format!(
                    "#{} {}: {} ({}-{})",
                    event.index,
                    result.player(event.side).name,
                    event.tag,
                    event.score_after[0],
                    event.score_after[1]
                )
            })
            .collect();

        Ok(Self {
            instructions: "Call this one-on-one basketball game as a play-by-play broadcaster. \
                Open with an introduction of both players, narrate the key runs and \
                momentum swings from the play log, point out each player's strengths \
                and weaknesses, and close with the final result."
                .to_string(),
            players,
            rules,
            plays,
            final_summary: template_summary(result),
        })
    }

    /// Flatten into a single prompt string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}\n", self.instructions);
        for (idx, player) in self.players.iter().enumerate() {
            let _ = writeln!(out, "Player {}: {player}\n", idx + 1);
        }
        out.push_str("Rules:\n");
        for rule in &self.rules {
            let _ = writeln!(out, "- {rule}");
        }
        out.push_str("\nPlay log:\n");
        for play in &self.plays {
            let _ = writeln!(out, "{play}");
        }
        let _ = write!(out, "\nResult: {}", self.final_summary);
        out
    }
}
