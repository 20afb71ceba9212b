use thiserror::Error;

/// Library-wide error type for pr-checks operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Event payload missing, unreadable, or lacking required fields.
    #[error("Failed to load event payload from '{path}': {details}")]
    EventLoad { path: String, details: String },

    /// Repository named by the event could not be resolved.
    #[error("Failed to resolve repository '{repository}': {source}")]
    RepositoryResolution {
        repository: String,
        #[source]
        source: Box<AppError>,
    },

    /// Pull request named by the event could not be fetched.
    #[error("Failed to resolve pull request #{number}: {source}")]
    PullRequestResolution {
        number: u64,
        #[source]
        source: Box<AppError>,
    },

    /// Check configuration could not be fetched from the repository.
    #[error("Failed to load check configuration '{path}': {source}")]
    ConfigLoad {
        path: String,
        #[source]
        source: Box<AppError>,
    },

    /// Check configuration is not valid YAML or does not match the schema.
    #[error("Failed to parse check configuration '{path}': {details}")]
    ConfigParse { path: String, details: String },

    /// A check regex failed to compile.
    #[error("Invalid {category} check pattern '{pattern}': {details}")]
    InvalidPattern { category: String, pattern: String, details: String },

    /// The hosting API answered with a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A request could not be sent or its response could not be decoded.
    #[error("GitHub request failed: {0}")]
    Transport(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Whether this error was reported by the hosting API itself.
    ///
    /// API errors raised while checks run are reported and turn into a failed
    /// run; anything else is treated as a defect and propagated.
    pub fn is_api_error(&self) -> bool {
        matches!(self, AppError::Api { .. })
    }

    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::RepositoryResolution { source, .. }
            | AppError::PullRequestResolution { source, .. }
            | AppError::ConfigLoad { source, .. } => source.status(),
            _ => None,
        }
    }
}
