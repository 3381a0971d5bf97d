use chrono::{DateTime, Utc};

/// Pick the earliest response instant for an issue.
///
/// The first comment always counts. The first review counts only for pull
/// requests. Returns `None` when neither exists.
pub fn resolve_first_response(
    comment_timestamps: &[DateTime<Utc>],
    is_pull_request: bool,
    review_timestamps: &[DateTime<Utc>],
) -> Option<DateTime<Utc>> {
    let first_comment = comment_timestamps.first().copied();
    let first_review = if is_pull_request {
        review_timestamps.first().copied()
    } else {
        None
    };

    match (first_comment, first_review) {
        (Some(comment), Some(review)) => Some(comment.min(review)),
        (comment, review) => comment.or(review),
    }
}
