use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use octocrab::models::issues::Issue;
use octocrab::Octocrab;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use crate::github::types::{IssueState, RawIssue, RepoId};

/// Maximum number of issues enriched concurrently
const MAX_CONCURRENT_ENRICHMENTS: usize = 10;

/// Comments and reviews per page. Only the first page is read since the
/// earliest entries come first.
const TIMESTAMPS_PER_PAGE: u8 = 100;

/// Build the full search query, scoped to a single repository
pub fn build_search_query(repo: &RepoId, search_query: &str) -> String {
    format!("repo:{} {}", repo, search_query.trim())
}

/// Turn an octocrab error's debug output into a message a user can act on
fn describe_api_error(error_str: &str) -> Option<&'static str> {
    if error_str.contains("do not have permission") || error_str.contains("resources do not exist") {
        Some("Repository not found or no access. Check the repository URL and token permissions (needs 'repo' scope for private repos).")
    } else if error_str.contains("401") || error_str.contains("Bad credentials") {
        Some("Authentication failed. Your GitHub token may be invalid or expired.")
    } else if error_str.contains("Validation Failed") || error_str.contains("422") {
        Some("GitHub rejected the search query. Check SEARCH_QUERY for invalid qualifiers.")
    } else {
        None
    }
}

fn map_api_error(e: octocrab::Error) -> anyhow::Error {
    let error_str = format!("{:?}", e);
    match describe_api_error(&error_str) {
        Some(message) => anyhow!(message),
        None => anyhow!("GitHub API error: {}", e),
    }
}

fn map_state(state: &octocrab::models::IssueState) -> IssueState {
    match state {
        octocrab::models::IssueState::Closed => IssueState::Closed,
        _ => IssueState::Open,
    }
}

/// Search GitHub for issues and pull requests matching the given query,
/// following every result page.
pub async fn search_issues(client: &Octocrab, query: &str) -> Result<Vec<Issue>> {
    // Retry strategy: exponential backoff with 3 attempts
    let retry_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(std::time::Duration::from_secs(5))
        .take(3);

    let first_page = Retry::spawn(retry_strategy, || async {
        client
            .search()
            .issues_and_pull_requests(query)
            .per_page(100)
            .send()
            .await
            .map_err(map_api_error)
    })
    .await?;

    let issues = client
        .all_pages(first_page)
        .await
        .map_err(map_api_error)
        .context("Failed to fetch search result pages")?;

    Ok(issues)
}

/// Creation times of the earliest comments on an issue, ascending
async fn fetch_comment_timestamps(
    client: &Octocrab,
    repo: &RepoId,
    number: u64,
) -> Result<Vec<DateTime<Utc>>> {
    let comments = client
        .issues(&repo.owner, &repo.repo)
        .list_comments(number)
        .per_page(TIMESTAMPS_PER_PAGE)
        .send()
        .await
        .map_err(map_api_error)
        .with_context(|| format!("Failed to fetch comments for #{}", number))?;

    let mut timestamps: Vec<_> = comments.items.iter().map(|c| c.created_at).collect();
    timestamps.sort();
    Ok(timestamps)
}

/// Submission times of the earliest reviews on a pull request, ascending.
/// Pending reviews have no submission time and are skipped.
async fn fetch_review_timestamps(
    client: &Octocrab,
    repo: &RepoId,
    number: u64,
) -> Result<Vec<DateTime<Utc>>> {
    let reviews = client
        .pulls(&repo.owner, &repo.repo)
        .list_reviews(number)
        .per_page(TIMESTAMPS_PER_PAGE)
        .send()
        .await
        .map_err(map_api_error)
        .with_context(|| format!("Failed to fetch reviews for #{}", number))?;

    let mut timestamps: Vec<_> = reviews.items.iter().filter_map(|r| r.submitted_at).collect();
    timestamps.sort();
    Ok(timestamps)
}

/// Flatten a search hit plus its comment and review timestamps into a RawIssue
async fn enrich_issue(client: &Octocrab, repo: &RepoId, issue: Issue) -> Result<RawIssue> {
    let is_pull_request = issue.pull_request.is_some();

    let comments_fut = fetch_comment_timestamps(client, repo, issue.number);
    let (comment_timestamps, review_timestamps) = if is_pull_request {
        let reviews_fut = fetch_review_timestamps(client, repo, issue.number);
        tokio::try_join!(comments_fut, reviews_fut)?
    } else {
        (comments_fut.await?, Vec::new())
    };

    tracing::debug!(
        number = issue.number,
        title = %issue.title,
        comments = comment_timestamps.len(),
        reviews = review_timestamps.len(),
        "Enriched issue"
    );

    Ok(RawIssue {
        number: issue.number,
        title: issue.title,
        url: issue.html_url.to_string(),
        created_at: issue.created_at,
        state: map_state(&issue.state),
        closed_at: issue.closed_at,
        comment_timestamps,
        is_pull_request,
        review_timestamps,
    })
}

/// Search a repository and assemble a RawIssue for every hit.
///
/// Results keep the search order. Any failed request fails the whole call.
pub async fn search_and_enrich_issues(
    client: &Octocrab,
    repo: &RepoId,
    search_query: &str,
) -> Result<Vec<RawIssue>> {
    let query = build_search_query(repo, search_query);
    tracing::info!(%query, "Searching for issues");

    let issues = search_issues(client, &query).await?;
    tracing::info!(count = issues.len(), "Search returned issues");

    stream::iter(issues)
        .map(|issue| enrich_issue(client, repo, issue))
        .buffered(MAX_CONCURRENT_ENRICHMENTS)
        .try_collect()
        .await
}
