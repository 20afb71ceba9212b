//! Process inputs for a single checker invocation.

use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::domain::AppError;

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Inputs supplied by the Actions runtime.
#[derive(Clone)]
pub struct RunnerSettings {
    /// Repository-relative path of the YAML check configuration.
    pub config_path: String,
    pub github_token: String,
    /// Local path of the JSON event payload.
    pub event_path: PathBuf,
    pub event_name: String,
    pub api_url: Url,
}

impl fmt::Debug for RunnerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerSettings")
            .field("config_path", &self.config_path)
            .field("event_path", &self.event_path)
            .field("event_name", &self.event_name)
            .field("api_url", &self.api_url)
            .field("github_token", &"[REDACTED]")
            .finish()
    }
}

/// Parse the API base URL, tolerating a trailing slash.
pub fn parse_api_url(raw: &str) -> Result<Url, AppError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| AppError::config_error(format!("Invalid API URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(AppError::config_error(format!("Invalid API URL '{}': not a base URL", raw)));
    }
    Ok(url)
}
