use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use std::fmt;

/// Owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    /// Parse a repository URL such as "https://github.com/owner/repo".
    /// A trailing slash or ".git" suffix is accepted.
    pub fn from_url(url: &str) -> Result<Self> {
        let url = url.trim();
        let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
        let path = without_scheme.split_once('/').map_or("", |(_, path)| path);

        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match parts.as_slice() {
            [owner, repo] => {
                let repo = repo.strip_suffix(".git").unwrap_or(repo);
                if repo.is_empty() {
                    bail!("Missing repository name in URL: {}", url);
                }
                Ok(RepoId {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => bail!("Expected a URL of the form https://github.com/owner/repo, got: {}", url),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Open/closed state of an issue or pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => write!(f, "open"),
            IssueState::Closed => write!(f, "closed"),
        }
    }
}

/// A fetched issue, flattened into the fields the metrics need.
///
/// Pull requests are issues with `is_pull_request` set; their reviews count as
/// responses alongside comments.
#[derive(Debug, Clone)]
pub struct RawIssue {
    pub number: u64,
    pub title: String,
    pub url: String,                            // HTML URL
    pub created_at: DateTime<Utc>,
    pub state: IssueState,
    pub closed_at: Option<DateTime<Utc>>,       // Set iff closed
    pub comment_timestamps: Vec<DateTime<Utc>>, // Ascending
    pub is_pull_request: bool,
    pub review_timestamps: Vec<DateTime<Utc>>,  // Ascending, PRs only
}

impl RawIssue {
    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }
}
