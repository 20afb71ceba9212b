//! Triggering event payload.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::AppError;

/// Event name GitHub Actions reports for pull-request triggers.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// The subset of the event payload the checker needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TriggerEvent {
    pub repository: EventRepository,
    /// Pull request number.
    pub number: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRepository {
    pub full_name: String,
}

impl TriggerEvent {
    pub fn repository_full_name(&self) -> &str {
        &self.repository.full_name
    }

    /// Parse an event payload from JSON text.
    pub fn parse_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

/// Read and parse the event payload written by the Actions runtime.
pub fn load_event(path: &Path) -> Result<TriggerEvent, AppError> {
    let event_load =
        |details: String| AppError::EventLoad { path: path.display().to_string(), details };

    let content = fs::read_to_string(path).map_err(|e| event_load(e.to_string()))?;
    TriggerEvent::parse_json(&content).map_err(|e| event_load(e.to_string()))
}
