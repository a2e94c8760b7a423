use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vocabrep_core::Answer;

/// One line of an answer log: who answered what, on which day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnswerEvent {
    #[serde(default = "default_user")]
    pub user: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub answer: Answer,
}

fn default_user() -> String {
    "default".to_string()
}

/// Reads a JSON array of events, ordered by day. Same-day events keep file order.
pub fn load_events(path: &Path) -> Result<Vec<AnswerEvent>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading events from {}", path.display()))?;
    let mut events: Vec<AnswerEvent> = serde_json::from_str(&data)
        .with_context(|| format!("parsing events in {}", path.display()))?;
    events.sort_by_key(|e| e.date);
    log::debug!("loaded {} events from {}", events.len(), path.display());
    Ok(events)
}
