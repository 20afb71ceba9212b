//! Pure check evaluation, free of side effects.

use std::collections::BTreeSet;

use crate::domain::{ChangedFile, FilePathCheck, TextCheck};

/// Message a text check posts for `subject`, if any.
///
/// Returns `message_if_matching` when the pattern matches and
/// `message_if_not_matching` otherwise. A check with no message for the taken
/// branch posts nothing.
pub fn select_text_message<'a>(check: &'a TextCheck, subject: &str) -> Option<&'a str> {
    if check.pattern.matches_start(subject) {
        check.message_if_matching.as_deref()
    } else {
        check.message_if_not_matching.as_deref()
    }
}

/// Union of reviewers from every file-path check matching any changed file.
pub fn collect_reviewers(checks: &[FilePathCheck], files: &[ChangedFile]) -> BTreeSet<String> {
    let mut pending = BTreeSet::new();
    for check in checks {
        for file in files {
            if check.pattern.matches_start(&file.filename) {
                pending.extend(check.reviewers.iter().cloned());
            }
        }
    }
    pending
}
