use chrono::Duration;
use std::fmt;

use super::response::resolve_first_response;
use crate::github::types::{IssueState, RawIssue};

/// Per-issue responsiveness figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueMetrics {
    pub title: String,
    pub url: String,
    pub state: IssueState,
    pub time_to_first_response: Option<Duration>,
    pub time_to_close: Option<Duration>, // Only for closed issues
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    /// Time to close requested for an issue that is not closed
    NotClosed { url: String, state: IssueState },
    /// Issue reported closed without a closing timestamp
    MissingClosedAt { url: String },
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::NotClosed { url, state } => write!(
                f,
                "Issue must be closed to measure time to close ({} is {})",
                url, state
            ),
            MetricsError::MissingClosedAt { url } => {
                write!(f, "Issue {} is closed but has no closed_at timestamp", url)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

/// Time between creation and the earliest comment or review, if any.
pub fn measure_time_to_first_response(issue: &RawIssue) -> Option<Duration> {
    resolve_first_response(
        &issue.comment_timestamps,
        issue.is_pull_request,
        &issue.review_timestamps,
    )
    .map(|first_response| first_response - issue.created_at)
}

/// Time between creation and closing. Only valid for closed issues.
pub fn measure_time_to_close(issue: &RawIssue) -> Result<Duration, MetricsError> {
    if !issue.is_closed() {
        return Err(MetricsError::NotClosed {
            url: issue.url.clone(),
            state: issue.state,
        });
    }

    let closed_at = issue.closed_at.ok_or_else(|| MetricsError::MissingClosedAt {
        url: issue.url.clone(),
    })?;

    Ok(closed_at - issue.created_at)
}

/// Derive metrics for a single issue. Open issues get no time to close.
pub fn derive_metrics(issue: &RawIssue) -> Result<IssueMetrics, MetricsError> {
    let time_to_close = if issue.is_closed() {
        Some(measure_time_to_close(issue)?)
    } else {
        None
    };

    Ok(IssueMetrics {
        title: issue.title.clone(),
        url: issue.url.clone(),
        state: issue.state,
        time_to_first_response: measure_time_to_first_response(issue),
        time_to_close,
    })
}

/// Derive metrics for every issue, keeping input order.
///
/// Returns the metrics along with the number of open and closed issues.
pub fn derive_all<I>(issues: I) -> Result<(Vec<IssueMetrics>, usize, usize), MetricsError>
where
    I: IntoIterator<Item = RawIssue>,
{
    let mut metrics = Vec::new();
    let mut open_count = 0;
    let mut closed_count = 0;

    for issue in issues {
        match issue.state {
            IssueState::Open => open_count += 1,
            IssueState::Closed => closed_count += 1,
        }
        metrics.push(derive_metrics(&issue)?);
    }

    Ok((metrics, open_count, closed_count))
}
