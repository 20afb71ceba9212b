//! pr-checks: regex-driven pull request policy checks for GitHub Actions.
//!
//! The checker reads a `pr_checks` YAML document from the pull request's head
//! commit, comments on the pull request according to its title and
//! description, and requests reviewers for the paths it touches.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;


use services::HttpGitHubClient;

pub use app::CheckRunner;
pub use domain::{AppError, CheckConfig, RunnerSettings};
pub use ports::GitHubApi;

/// Run every configured check against the pull request named by the event.
///
/// Returns `Ok(true)` when all checks ran and the pull request was refreshed,
/// `Ok(false)` for a non-pull-request event or a rejected API call, and an
/// error for anything that prevents the run from starting or is unexpected.
pub fn run_checks(settings: &RunnerSettings) -> Result<bool, AppError> {
    let github = HttpGitHubClient::new(&settings.github_token, settings.api_url.clone())?;
    run_checks_with(&github, settings)
}

/// Same as [`run_checks`] against any `GitHubApi` implementation.
pub fn run_checks_with<G: GitHubApi + ?Sized>(
    github: &G,
    settings: &RunnerSettings,
) -> Result<bool, AppError> {
    let runner = CheckRunner::initialize(github, settings)?;
    runner.run()
}
