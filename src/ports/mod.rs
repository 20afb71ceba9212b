mod github;

pub use github::GitHubApi;
