//! Pull-request check orchestration.
//!
//! A run resolves its inputs strictly in order (event, repository, pull
//! request, then the configuration pinned to the pull request's head commit)
//! and then applies the title, description, and file-path passes.

use tracing::{debug, error, info, warn};

use crate::domain::{
    AppError, CheckCategory, CheckConfig, PULL_REQUEST_EVENT, PullRequest, Repository,
    RunnerSettings, TextCheck, collect_reviewers, load_event, parse_check_config,
    select_text_message,
};
use crate::ports::GitHubApi;

/// Guidance attached to API failures raised while checks run.
const API_FAILURE_HINT: &str = "check your configuration file and repository permissions";

/// Orchestrates one checker invocation against a single pull request.
pub struct CheckRunner<'a, G: GitHubApi + ?Sized> {
    github: &'a G,
    event_name: String,
    repository: Repository,
    pull_request: PullRequest,
    config: CheckConfig,
}

impl<'a, G: GitHubApi + ?Sized> CheckRunner<'a, G> {
    /// Resolve everything a run needs.
    ///
    /// Every failure here is fatal: nothing has been posted yet.
    pub fn initialize(github: &'a G, settings: &RunnerSettings) -> Result<Self, AppError> {
        let event = load_event(&settings.event_path).inspect_err(|e| error!("{}", e))?;
        debug!(?event, "Loaded trigger event");

        let repository = github.get_repository(event.repository_full_name()).map_err(|e| {
            let err = AppError::RepositoryResolution {
                repository: event.repository_full_name().to_string(),
                source: Box::new(e),
            };
            error!("{}", err);
            err
        })?;

        let pull_request =
            github.get_pull_request(&repository.full_name, event.number).map_err(|e| {
                let err =
                    AppError::PullRequestResolution { number: event.number, source: Box::new(e) };
                error!("{}", err);
                err
            })?;
        debug!(?pull_request, "Resolved pull request");

        let config = load_config(github, &repository, &pull_request, &settings.config_path)?;

        Ok(Self {
            github,
            event_name: settings.event_name.clone(),
            repository,
            pull_request,
            config,
        })
    }

    pub fn pull_request(&self) -> &PullRequest {
        &self.pull_request
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Re-read a configuration file at this run's head commit.
    pub fn load_config(&self, path: &str) -> Result<CheckConfig, AppError> {
        load_config(self.github, &self.repository, &self.pull_request, path)
    }

    /// Run all check passes and refresh the pull request.
    ///
    /// Returns `Ok(false)` when the event is not a pull-request event, when
    /// the API rejects a call, or when the refresh is not acknowledged. Any
    /// other error is logged and returned.
    pub fn run(&self) -> Result<bool, AppError> {
        if self.event_name != PULL_REQUEST_EVENT {
            error!(
                "Event {} not supported, this action only supports {} events",
                self.event_name, PULL_REQUEST_EVENT
            );
            return Ok(false);
        }

        info!(
            "Running PR checks for PR #{} ({})",
            self.pull_request.number, self.pull_request.title
        );
        if self.config.is_empty() {
            warn!("No checks configured; only refreshing the pull request");
        }

        match self.run_checks() {
            Ok(true) => {
                info!("PR checked and updated successfully");
                Ok(true)
            }
            Ok(false) => {
                warn!("PR update failed");
                Ok(false)
            }
            Err(e) if e.is_api_error() => {
                error!(
                    status = ?e.status(),
                    "GitHub API error while running checks: {}; {}",
                    e,
                    API_FAILURE_HINT
                );
                Ok(false)
            }
            Err(e) => {
                error!("Unexpected error while running checks: {}", e);
                Err(e)
            }
        }
    }

    fn run_checks(&self) -> Result<bool, AppError> {
        self.run_title_checks()?;
        self.run_description_checks()?;
        self.run_file_path_checks()?;
        self.github.update_pull_request(&self.repository.full_name, self.pull_request.number)
    }

    pub fn run_title_checks(&self) -> Result<(), AppError> {
        self.run_text_checks(CheckCategory::Title, &self.config.title, &self.pull_request.title)
    }

    /// A missing body is matched as an empty string.
    pub fn run_description_checks(&self) -> Result<(), AppError> {
        self.run_text_checks(
            CheckCategory::Description,
            &self.config.description,
            self.pull_request.body_text(),
        )
    }

    fn run_text_checks(
        &self,
        category: CheckCategory,
        checks: &[TextCheck],
        subject: &str,
    ) -> Result<(), AppError> {
        for check in checks {
            let Some(message) = select_text_message(check, subject) else {
                debug!(%category, pattern = check.pattern.as_str(), "No message for check outcome");
                continue;
            };
            debug!(%category, pattern = check.pattern.as_str(), "Posting check comment");
            self.github.create_issue_comment(
                &self.repository.full_name,
                self.pull_request.number,
                message,
            )?;
        }
        Ok(())
    }

    /// Request every reviewer whose check matches a changed file, in one call.
    pub fn run_file_path_checks(&self) -> Result<(), AppError> {
        if self.config.file_path.is_empty() {
            return Ok(());
        }

        let files =
            self.github.get_changed_files(&self.repository.full_name, self.pull_request.number)?;
        let reviewers: Vec<String> =
            collect_reviewers(&self.config.file_path, &files).into_iter().collect();

        if reviewers.is_empty() {
            debug!(files = files.len(), "No file path check requested reviewers");
            return Ok(());
        }

        info!("Requesting review from {}", reviewers.join(", "));
        self.github.create_review_request(
            &self.repository.full_name,
            self.pull_request.number,
            &reviewers,
        )
    }
}

/// Fetch and parse the check configuration at the pull request's head commit.
pub fn load_config<G: GitHubApi + ?Sized>(
    github: &G,
    repository: &Repository,
    pull_request: &PullRequest,
    path: &str,
) -> Result<CheckConfig, AppError> {
    let bytes = github
        .get_file_contents(&repository.full_name, path, pull_request.head_sha())
        .map_err(|e| {
            let err = AppError::ConfigLoad { path: path.to_string(), source: Box::new(e) };
            error!("{} (ref {})", err, pull_request.head_sha());
            err
        })?;

    let content = String::from_utf8(bytes).map_err(|e| {
        let err = AppError::ConfigParse { path: path.to_string(), details: e.to_string() };
        error!("{}", err);
        err
    })?;

    parse_check_config(&content, path).inspect_err(|e| error!("{}", e))
}
