//! CLI Adapter.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use tracing::error;

use crate::app::logging::{LogFormat, init_tracing};
use crate::domain::{AppError, DEFAULT_API_URL, DEFAULT_CONFIG_PATH, RunnerSettings, parse_api_url};

#[derive(Parser)]
#[command(name = "pr-checks")]
#[command(version)]
#[command(
    about = "Run regex-based policy checks against a pull request and request reviewers",
    long_about = None
)]
struct Cli {
    /// Repository-relative path of the YAML check configuration
    #[arg(long, env = "INPUT_CONFIG_FILE", default_value = DEFAULT_CONFIG_PATH)]
    config_file: String,
    /// Token used to authenticate against the GitHub API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,
    /// Path to the JSON payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,
    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: String,
    /// Base URL of the GitHub API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Log output format
    #[arg(long, env = "PR_CHECKS_LOG_FORMAT", value_enum, default_value_t = CliLogFormat::Text)]
    log_format: CliLogFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliLogFormat {
    Text,
    Json,
}

impl From<CliLogFormat> for LogFormat {
    fn from(value: CliLogFormat) -> Self {
        match value {
            CliLogFormat::Text => LogFormat::Text,
            CliLogFormat::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    fn into_settings(self) -> Result<RunnerSettings, AppError> {
        Ok(RunnerSettings {
            config_path: self.config_file,
            github_token: self.github_token,
            event_path: self.event_path,
            event_name: self.event_name,
            api_url: parse_api_url(&self.api_url)?,
        })
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };
    init_tracing(cli.log_format.into());

    let result = cli.into_settings().inspect_err(|e| error!("{}", e)).and_then(|settings| {
        // Failures past this point are logged where they happen.
        crate::run_checks(&settings)
    });

    match result {
        Ok(true) => {}
        Ok(false) | Err(_) => std::process::exit(1),
    }
}
