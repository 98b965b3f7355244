pub mod json;
pub mod md;

use crate::error::{FunalyticsError, Result};
use crate::types::scoring::{EventReport, RankedEvent, ScoreBatch};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render_scores(batch: &ScoreBatch<EventReport>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(batch).map_err(FunalyticsError::Json),
        OutputFormat::Md => Ok(md::scores_to_markdown(batch)),
    }
}

pub fn render_ranking(
    batch: &ScoreBatch<RankedEvent>,
    audience: &str,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(batch).map_err(FunalyticsError::Json),
        OutputFormat::Md => Ok(md::ranking_to_markdown(batch, audience)),
    }
}
