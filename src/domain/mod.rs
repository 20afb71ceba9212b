pub mod check_config;
pub mod error;
pub mod evaluation;
pub mod event;
pub mod pull_request;
pub mod settings;

pub use check_config::{
    CheckCategory, CheckConfig, CheckPattern, DEFAULT_CONFIG_PATH, FilePathCheck, TextCheck,
    parse_check_config,
};
pub use error::AppError;
pub use evaluation::{collect_reviewers, select_text_message};
pub use event::{PULL_REQUEST_EVENT, TriggerEvent, load_event};
pub use pull_request::{ChangedFile, PullRequest, PullRequestHead, Repository};
pub use settings::{DEFAULT_API_URL, RunnerSettings, parse_api_url};
