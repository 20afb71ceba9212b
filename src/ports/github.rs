use crate::domain::{AppError, ChangedFile, PullRequest, Repository};

/// Hosting-platform operations the checker depends on.
///
/// Repositories are addressed by full name (`owner/repo`). Errors reported
/// by the platform are `AppError::Api`; failures to reach it are
/// `AppError::Transport`.
pub trait GitHubApi {
    /// Resolve a repository by full name.
    fn get_repository(&self, full_name: &str) -> Result<Repository, AppError>;

    /// Raw file contents at a specific git ref.
    fn get_file_contents(&self, repo: &str, path: &str, git_ref: &str)
    -> Result<Vec<u8>, AppError>;

    fn get_pull_request(&self, repo: &str, number: u64) -> Result<PullRequest, AppError>;

    /// All files changed by a pull request.
    fn get_changed_files(&self, repo: &str, number: u64) -> Result<Vec<ChangedFile>, AppError>;

    /// Post a comment on the pull request's conversation.
    fn create_issue_comment(&self, repo: &str, number: u64, body: &str) -> Result<(), AppError>;

    fn create_review_request(
        &self,
        repo: &str,
        number: u64,
        reviewers: &[String],
    ) -> Result<(), AppError>;

    /// Refresh the pull request. Returns whether the platform acknowledged it.
    fn update_pull_request(&self, repo: &str, number: u64) -> Result<bool, AppError>;
}
