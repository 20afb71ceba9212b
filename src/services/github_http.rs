//! GitHub REST client implementation using reqwest.

use base64::{Engine as _, engine::general_purpose};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::domain::{AppError, ChangedFile, PullRequest, Repository};
use crate::ports::GitHubApi;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "x-github-api-version";
const FILES_PER_PAGE: usize = 100;

/// HTTP client for the GitHub REST API.
#[derive(Clone)]
pub struct HttpGitHubClient {
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpGitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGitHubClient")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl HttpGitHubClient {
    /// Create a client authenticated with `token`.
    ///
    /// No request is made here; a bad token surfaces on the first call.
    pub fn new(token: &str, api_url: Url) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AppError::config_error("GitHub token contains invalid characters"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("pr-checks/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(GITHUB_API_VERSION, HeaderValue::from_static("2022-11-28"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { api_url, client })
    }

    /// Build an endpoint URL from path segments below the API base.
    ///
    /// Segments containing `/` (repository full names, file paths) are split so
    /// every component is percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::config_error(format!("Invalid API URL '{}'", self.api_url)))?
            .pop_if_empty()
            .extend(segments.iter().flat_map(|s| s.split('/')).filter(|s| !s.is_empty()));
        Ok(url)
    }

    fn get(&self, url: Url) -> Result<Response, AppError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().map_err(transport)?;
        check_status(response)
    }

    fn post<T: Serialize>(&self, url: Url, body: &T) -> Result<Response, AppError> {
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().map_err(transport)?;
        check_status(response)
    }
}

fn transport(err: reqwest::Error) -> AppError {
    AppError::Transport(err.to_string())
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Turn a non-success response into `AppError::Api`.
fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or_else(|_| if text.is_empty() { status.to_string() } else { text });
    Err(AppError::Api { status: status.as_u16(), message })
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct ReviewRequest<'a> {
    reviewers: &'a [String],
}

impl GitHubApi for HttpGitHubClient {
    fn get_repository(&self, full_name: &str) -> Result<Repository, AppError> {
        let url = self.endpoint(&["repos", full_name])?;
        self.get(url)?.json().map_err(transport)
    }

    fn get_file_contents(
        &self,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Vec<u8>, AppError> {
        let mut url = self.endpoint(&["repos", repo, "contents", path])?;
        url.query_pairs_mut().append_pair("ref", git_ref);

        let contents: ContentsResponse = self.get(url)?.json().map_err(transport)?;
        match contents.encoding.as_deref() {
            Some("base64") | None => general_purpose::STANDARD
                .decode(contents.content.replace('\n', ""))
                .map_err(|e| {
                    AppError::Transport(format!("Failed to decode contents of '{}': {}", path, e))
                }),
            Some(other) => Err(AppError::Transport(format!(
                "Unsupported content encoding '{}' for '{}'",
                other, path
            ))),
        }
    }

    fn get_pull_request(&self, repo: &str, number: u64) -> Result<PullRequest, AppError> {
        let url = self.endpoint(&["repos", repo, "pulls", &number.to_string()])?;
        self.get(url)?.json().map_err(transport)
    }

    fn get_changed_files(&self, repo: &str, number: u64) -> Result<Vec<ChangedFile>, AppError> {
        let base = self.endpoint(&["repos", repo, "pulls", &number.to_string(), "files"])?;
        let mut files = Vec::new();

        for page in 1.. {
            let mut url = base.clone();
            url.query_pairs_mut()
                .append_pair("per_page", &FILES_PER_PAGE.to_string())
                .append_pair("page", &page.to_string());

            let batch: Vec<ChangedFile> = self.get(url)?.json().map_err(transport)?;
            let short_page = batch.len() < FILES_PER_PAGE;
            files.extend(batch);
            if short_page {
                break;
            }
        }

        Ok(files)
    }

    fn create_issue_comment(&self, repo: &str, number: u64, body: &str) -> Result<(), AppError> {
        let url = self.endpoint(&["repos", repo, "issues", &number.to_string(), "comments"])?;
        self.post(url, &CommentRequest { body })?;
        Ok(())
    }

    fn create_review_request(
        &self,
        repo: &str,
        number: u64,
        reviewers: &[String],
    ) -> Result<(), AppError> {
        let url =
            self.endpoint(&["repos", repo, "pulls", &number.to_string(), "requested_reviewers"])?;
        self.post(url, &ReviewRequest { reviewers })?;
        Ok(())
    }

    fn update_pull_request(&self, repo: &str, number: u64) -> Result<bool, AppError> {
        let refreshed = self.get_pull_request(repo, number)?;
        Ok(refreshed.number == number)
    }
}
