use anyhow::{Context, Result};
use clap::ValueEnum;
use hoopsim_game::{
    Commentary, CommentaryPrompt, Commentator, SimulationResult, TemplateCommentator, narrate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CommentaryMode {
    /// No commentary
    Off,
    /// Deterministic one-line recap
    Template,
    /// Ask an HTTP text-generation service, falling back to the template
    Http,
}

#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("failed to build commentary prompt: {0}")]
    Prompt(#[from] serde_json::Error),
    #[error("commentary request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct CommentaryRequest<'a> {
    prompt: String,
    result: &'a SimulationResult,
}

#[derive(Deserialize)]
struct CommentaryResponse {
    text: String,
}

/// Posts the broadcast prompt to `endpoint` and reads back `{"text": ...}`.
pub struct HttpCommentator {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpCommentator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("hoopsim-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Commentator for HttpCommentator {
    type Error = CommentaryError;

    fn generate_commentary(&self, result: &SimulationResult) -> Result<String, CommentaryError> {
        let prompt = CommentaryPrompt::from_result(result)?.render();
        let response: CommentaryResponse = self
            .client
            .post(&self.endpoint)
            .json(&CommentaryRequest { prompt, result })
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response.text)
    }
}

/// Produce commentary for a finished result. Never fails: every error path
/// ends in the template summary.
pub async fn commentary_for(
    mode: CommentaryMode,
    endpoint: &str,
    timeout: Duration,
    result: &SimulationResult,
) -> Option<Commentary> {
    match mode {
        CommentaryMode::Off => None,
        CommentaryMode::Template => Some(narrate(&TemplateCommentator, result)),
        CommentaryMode::Http => {
            let endpoint = endpoint.to_string();
            let owned = result.clone();
            let task = tokio::task::spawn_blocking(move || {
                HttpCommentator::new(endpoint, timeout)
                    .map(|commentator| narrate(&commentator, &owned))
            });
            match task.await {
                Ok(Ok(commentary)) => Some(commentary),
                Ok(Err(err)) => {
                    log::warn!("commentary client unavailable: {err:#}");
                    Some(template_only(result))
                }
                Err(err) => {
                    log::warn!("commentary task failed: {err}");
                    Some(template_only(result))
                }
            }
        }
    }
}

fn template_only(result: &SimulationResult) -> Commentary {
    narrate(&TemplateCommentator, result)
}
