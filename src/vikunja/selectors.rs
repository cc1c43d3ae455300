//! Pure helpers over fetched records.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use super::{Comment, Label};
use crate::api::ApiError;

/// Why [`latest_comment`] could not pick a comment.
#[derive(Debug, Error)]
pub enum CommentError {
    /// The slice was empty.
    #[error("No comments available")]
    Empty,

    /// A comment's `updated` field is not RFC 3339.
    #[error("Comment {id} has an invalid updated timestamp '{value}': {source}")]
    InvalidTimestamp {
        /// Comment id
        id: i64,
        /// The raw timestamp
        value: String,
        /// Underlying parse error
        #[source]
        source: chrono::ParseError,
    },
}

/// Returns the most recently updated comment.
///
/// Ties keep the earlier comment in slice order.
///
/// # Errors
///
/// [`CommentError::Empty`] for an empty slice, or
/// [`CommentError::InvalidTimestamp`] for the first unparseable `updated`.
pub fn latest_comment(comments: &[Comment]) -> Result<&Comment, CommentError> {
    let mut latest: Option<(&Comment, DateTime<FixedOffset>)> = None;

    for comment in comments {
        let updated = DateTime::parse_from_rfc3339(&comment.updated).map_err(|source| {
            CommentError::InvalidTimestamp {
                id: comment.id,
                value: comment.updated.clone(),
                source,
            }
        })?;
        if latest.is_none_or(|(_, best)| updated > best) {
            latest = Some((comment, updated));
        }
    }

    latest.map(|(comment, _)| comment).ok_or(CommentError::Empty)
}

/// Picks the labels named by `titles`, in `titles` order.
///
/// If several labels share a title the last one wins.
///
/// # Errors
///
/// [`ApiError::Developer`] if a title matches no label; callers are expected
/// to pass only titles that exist.
pub fn labels_with_titles(labels: &[Label], titles: &[&str]) -> Result<Vec<Label>, ApiError> {
    let by_title: HashMap<&str, &Label> = labels.iter().map(|l| (l.title.as_str(), l)).collect();

    titles
        .iter()
        .map(|title| {
            by_title
                .get(title)
                .map(|label| (*label).clone())
                .ok_or_else(|| ApiError::developer(format!("Label with title {title} not found")))
        })
        .collect()
}
