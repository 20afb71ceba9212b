//! Hosting-platform resources read by the checker.

use serde::Deserialize;

/// A resolved repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub full_name: String,
}

/// Pull request state as last fetched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// Description; GitHub reports `null` for an empty body.
    #[serde(default)]
    pub body: Option<String>,
    pub head: PullRequestHead,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestHead {
    pub sha: String,
}

impl PullRequest {
    pub fn head_sha(&self) -> &str {
        &self.head.sha
    }

    /// Body text, with a missing body read as empty.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// A file touched by a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
}
