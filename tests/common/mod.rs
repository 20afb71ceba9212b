//! Shared testing utilities for pr-checks CLI tests.

use assert_cmd::Command;
use base64::{Engine as _, engine::general_purpose};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const REPO: &str = "octo/widgets";
pub const PR_NUMBER: u64 = 7;
pub const HEAD_SHA: &str = "abc123";
pub const CONFIG_PATH: &str = ".github/pr_checks_config.yml";

/// Isolated environment: a fake GitHub API plus an event payload on disk.
#[allow(dead_code)]
pub struct TestContext {
    pub server: ServerGuard,
    root: TempDir,
    event_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a context with a pull-request event for `REPO#PR_NUMBER`.
    pub fn new() -> Self {
        let ctx = Self::empty();
        ctx.write_event(&format!(
            r#"{{"action":"opened","number":{PR_NUMBER},"repository":{{"full_name":"{REPO}"}}}}"#
        ));
        ctx
    }

    /// Create a context without an event payload.
    pub fn empty() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let event_path = root.path().join("event.json");
        Self { server: Server::new(), root, event_path }
    }

    pub fn write_event(&self, payload: &str) {
        fs::write(&self.event_path, payload).expect("Failed to write event payload");
    }

    /// Build a command for the compiled `pr-checks` binary pointed at the fake API.
    pub fn cli(&self, event_name: &str) -> Command {
        self.cli_with_api_url(event_name, &self.server.url())
    }

    /// Build a command for the compiled `pr-checks` binary with an explicit API URL.
    pub fn cli_with_api_url(&self, event_name: &str, api_url: &str) -> Command {
        let mut cmd = self.bare_cli();
        cmd.args(["--github-token", "test-token"])
            .arg("--event-path")
            .arg(&self.event_path)
            .args(["--event-name", event_name])
            .args(["--api-url", api_url]);
        cmd
    }

    /// Build a command with no inputs and none inherited from the environment.
    pub fn bare_cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("pr-checks").expect("Failed to locate pr-checks binary");
        cmd.current_dir(self.root.path()).env("NO_COLOR", "1");
        for key in [
            "RUST_LOG",
            "INPUT_CONFIG_FILE",
            "GITHUB_TOKEN",
            "GITHUB_EVENT_PATH",
            "GITHUB_EVENT_NAME",
            "GITHUB_API_URL",
            "PR_CHECKS_LOG_FORMAT",
        ] {
            cmd.env_remove(key);
        }
        cmd
    }

    pub fn event_path(&self) -> &Path {
        &self.event_path
    }

    // The `mock_*` builders are returned unregistered so tests can set
    // expectations before calling `create()`.

    pub fn mock_repository(&mut self) -> Mock {
        self.server
            .mock("GET", format!("/repos/{REPO}").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"full_name":"{REPO}","default_branch":"main"}}"#))
    }

    /// Pull request fetch; the run reads it once and refreshes it once.
    pub fn mock_pull_request(&mut self, title: &str, body: Option<&str>) -> Mock {
        let payload = serde_json::json!({
            "number": PR_NUMBER,
            "title": title,
            "body": body,
            "head": { "sha": HEAD_SHA, "ref": "feature" },
        });
        self.server
            .mock("GET", format!("/repos/{REPO}/pulls/{PR_NUMBER}").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(payload.to_string())
    }

    pub fn mock_config(&mut self, yaml: &str) -> Mock {
        let payload = serde_json::json!({
            "type": "file",
            "encoding": "base64",
            "content": general_purpose::STANDARD.encode(yaml),
        });
        self.server
            .mock("GET", format!("/repos/{REPO}/contents/{CONFIG_PATH}").as_str())
            .match_query(Matcher::UrlEncoded("ref".into(), HEAD_SHA.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(payload.to_string())
    }

    pub fn mock_missing_config(&mut self) -> Mock {
        self.server
            .mock("GET", format!("/repos/{REPO}/contents/{CONFIG_PATH}").as_str())
            .match_query(Matcher::UrlEncoded("ref".into(), HEAD_SHA.into()))
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"Not Found"}"#)
    }

    pub fn mock_changed_files(&mut self, names: &[&str]) -> Mock {
        let files: Vec<_> = names
            .iter()
            .map(|n| serde_json::json!({ "filename": n, "status": "modified" }))
            .collect();
        self.server
            .mock("GET", format!("/repos/{REPO}/pulls/{PR_NUMBER}/files").as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::Value::Array(files).to_string())
    }

    /// Comment endpoint accepting any body.
    pub fn mock_any_comment(&mut self) -> Mock {
        self.server
            .mock("POST", format!("/repos/{REPO}/issues/{PR_NUMBER}/comments").as_str())
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1}"#)
    }

    pub fn mock_comment(&mut self, body: &str) -> Mock {
        self.server
            .mock("POST", format!("/repos/{REPO}/issues/{PR_NUMBER}/comments").as_str())
            .match_body(Matcher::Json(serde_json::json!({ "body": body })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1}"#)
    }

    /// Review request endpoint accepting any body.
    pub fn mock_any_review_request(&mut self) -> Mock {
        self.server
            .mock("POST", format!("/repos/{REPO}/pulls/{PR_NUMBER}/requested_reviewers").as_str())
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body("{}")
    }

    pub fn mock_review_request(&mut self, reviewers: &[&str]) -> Mock {
        self.server
            .mock("POST", format!("/repos/{REPO}/pulls/{PR_NUMBER}/requested_reviewers").as_str())
            .match_body(Matcher::Json(serde_json::json!({ "reviewers": reviewers })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body("{}")
    }
}
