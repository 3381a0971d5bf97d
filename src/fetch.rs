use anyhow::Result;
use octocrab::Octocrab;

use crate::config::Config;
use crate::github::{search_and_enrich_issues, RawIssue, RepoId};
use crate::metrics::{derive_all, summarize, AggregateSummary, IssueMetrics, MetricsError};

/// Metrics for every matching issue plus their summary
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub issues: Vec<IssueMetrics>,
    pub summary: AggregateSummary,
}

/// Derive and summarize metrics for already-fetched issues.
pub fn build_report<I>(raw_issues: I) -> Result<MetricsReport, MetricsError>
where
    I: IntoIterator<Item = RawIssue>,
{
    let (issues, open_count, closed_count) = derive_all(raw_issues)?;
    let summary = summarize(&issues);
    debug_assert_eq!((summary.open_count, summary.closed_count), (open_count, closed_count));

    tracing::debug!(
        open = open_count,
        closed = closed_count,
        "Derived metrics for {} issues",
        issues.len()
    );

    Ok(MetricsReport { issues, summary })
}

/// Fetch the issues matching the configured search and compute their metrics.
///
/// Called from main.rs once per run.
pub async fn collect_issue_metrics(client: &Octocrab, config: &Config) -> Result<MetricsReport> {
    let repo = RepoId::from_url(&config.repository_url)?;
    tracing::info!(repository = %repo, "Collecting issue metrics");

    let raw_issues = search_and_enrich_issues(client, &repo, &config.search_query).await?;
    if raw_issues.is_empty() {
        tracing::warn!("No issues found");
    }

    let report = build_report(raw_issues)?;

    if let Some(avg) = report.summary.average_time_to_first_response {
        tracing::info!("Average time to first response: {}", crate::output::format_duration(avg));
    }
    if let Some(avg) = report.summary.average_time_to_close {
        tracing::info!("Average time to close: {}", crate::output::format_duration(avg));
    }

    Ok(report)
}
