//! Check configuration models and parsing.
//!
//! The configuration is a YAML document fetched from the repository under
//! review:
//!
//! ```yaml
//! pr_checks:
//!   title:
//!     - regex: "^\\[WIP\\]"
//!       message_if_matching: "Work in progress"
//!   description: []
//!   file_path:
//!     - regex: "^docs/"
//!       reviewers: [alice]
//! ```
//!
//! Every category is optional. Patterns are compiled while parsing so a bad
//! regex fails the load instead of a later check pass.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::domain::AppError;

/// Default repository-relative location of the check configuration.
pub const DEFAULT_CONFIG_PATH: &str = ".github/pr_checks_config.yml";

/// Check category names, as they appear under `pr_checks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckCategory {
    Title,
    Description,
    FilePath,
}

impl CheckCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckCategory::Title => "title",
            CheckCategory::Description => "description",
            CheckCategory::FilePath => "file_path",
        }
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A regex that only matches at the start of the subject.
///
/// Matching is not full-string: `^docs/` and `docs/` both match
/// `docs/readme.md`, and neither matches `src/docs/readme.md`.
#[derive(Debug, Clone)]
pub struct CheckPattern {
    source: String,
    regex: Regex,
}

impl CheckPattern {
    pub fn new(source: &str, category: CheckCategory) -> Result<Self, AppError> {
        let regex = Regex::new(&format!(r"\A(?:{source})")).map_err(|e| {
            AppError::InvalidPattern {
                category: category.to_string(),
                pattern: source.to_string(),
                details: e.to_string(),
            }
        })?;
        Ok(Self { source: source.to_string(), regex })
    }

    /// Pattern text as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches_start(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }
}

/// A title or description check.
#[derive(Debug, Clone)]
pub struct TextCheck {
    pub pattern: CheckPattern,
    pub message_if_matching: Option<String>,
    pub message_if_not_matching: Option<String>,
}

/// A changed-file-path check.
#[derive(Debug, Clone)]
pub struct FilePathCheck {
    pub pattern: CheckPattern,
    pub reviewers: Vec<String>,
}

/// Parsed `pr_checks` configuration.
#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    pub title: Vec<TextCheck>,
    pub description: Vec<TextCheck>,
    pub file_path: Vec<FilePathCheck>,
}

impl CheckConfig {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.file_path.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    /// Outer `None` is an absent key; inner `None` is `pr_checks:` with no value.
    #[serde(default, deserialize_with = "present")]
    pr_checks: Option<Option<ChecksSection>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<ChecksSection>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ChecksSection>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
struct ChecksSection {
    #[serde(default)]
    title: Option<Vec<TextCheckEntry>>,
    #[serde(default)]
    description: Option<Vec<TextCheckEntry>>,
    #[serde(default)]
    file_path: Option<Vec<FilePathCheckEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TextCheckEntry {
    regex: String,
    #[serde(default)]
    message_if_matching: Option<String>,
    #[serde(default)]
    message_if_not_matching: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilePathCheckEntry {
    regex: String,
    #[serde(default)]
    reviewers: Vec<String>,
}

/// Parse a check configuration document.
///
/// `path` is only used for error reporting.
pub fn parse_check_config(content: &str, path: &str) -> Result<CheckConfig, AppError> {
    let document: ConfigDocument = serde_yaml::from_str(content)
        .map_err(|e| AppError::ConfigParse { path: path.to_string(), details: e.to_string() })?;

    let section = document
        .pr_checks
        .ok_or_else(|| AppError::ConfigParse {
            path: path.to_string(),
            details: "missing top-level 'pr_checks' key".to_string(),
        })?
        .unwrap_or_default();

    Ok(CheckConfig {
        title: text_checks(section.title.unwrap_or_default(), CheckCategory::Title)?,
        description: text_checks(
            section.description.unwrap_or_default(),
            CheckCategory::Description,
        )?,
        file_path: section
            .file_path
            .unwrap_or_default()
            .into_iter()
            .map(|entry| -> Result<FilePathCheck, AppError> {
                Ok(FilePathCheck {
                    pattern: CheckPattern::new(&entry.regex, CheckCategory::FilePath)?,
                    reviewers: entry.reviewers,
                })
            })
            .collect::<Result<_, _>>()?,
    })
}

fn text_checks(
    entries: Vec<TextCheckEntry>,
    category: CheckCategory,
) -> Result<Vec<TextCheck>, AppError> {
    entries
        .into_iter()
        .map(|entry| -> Result<TextCheck, AppError> {
            Ok(TextCheck {
                pattern: CheckPattern::new(&entry.regex, category)?,
                message_if_matching: non_empty(entry.message_if_matching),
                message_if_not_matching: non_empty(entry.message_if_not_matching),
            })
        })
        .collect()
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.is_empty())
}
