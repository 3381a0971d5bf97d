pub mod client;
pub mod search;
pub mod types;

pub use client::create_client;
pub use search::{build_search_query, search_and_enrich_issues, search_issues};
pub use types::{IssueState, RawIssue, RepoId};
