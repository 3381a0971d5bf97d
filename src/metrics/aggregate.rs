use chrono::Duration;

use super::engine::IssueMetrics;
use crate::github::types::IssueState;

/// Summary statistics over a collection of issue metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSummary {
    pub average_time_to_first_response: Option<Duration>,
    pub average_time_to_close: Option<Duration>,
    pub open_count: usize,
    pub closed_count: usize,
    pub total_count: usize,
}

/// Mean of the present durations, or `None` when there are none.
///
/// Divides by the number of present values, not the collection size.
fn average_present<I>(durations: I) -> Option<Duration>
where
    I: IntoIterator<Item = Option<Duration>>,
{
    let (total_ms, count) = durations
        .into_iter()
        .flatten()
        .fold((0i64, 0i64), |(sum, n), d| (sum + d.num_milliseconds(), n + 1));

    if count == 0 {
        return None;
    }
    Some(Duration::milliseconds(total_ms / count))
}

pub fn average_time_to_first_response(issues: &[IssueMetrics]) -> Option<Duration> {
    average_present(issues.iter().map(|m| m.time_to_first_response))
}

pub fn average_time_to_close(issues: &[IssueMetrics]) -> Option<Duration> {
    average_present(issues.iter().map(|m| m.time_to_close))
}

/// Tally (open, closed) issues.
pub fn count_states(issues: &[IssueMetrics]) -> (usize, usize) {
    issues.iter().fold((0, 0), |(open, closed), m| match m.state {
        IssueState::Open => (open + 1, closed),
        IssueState::Closed => (open, closed + 1),
    })
}

pub fn summarize(issues: &[IssueMetrics]) -> AggregateSummary {
    let (open_count, closed_count) = count_states(issues);

    AggregateSummary {
        average_time_to_first_response: average_time_to_first_response(issues),
        average_time_to_close: average_time_to_close(issues),
        open_count,
        closed_count,
        total_count: issues.len(),
    }
}
