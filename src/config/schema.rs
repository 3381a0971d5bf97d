use serde::{Deserialize, Serialize};
use std::fmt;

use crate::output::DEFAULT_REPORT_FILE;

/// Run configuration.
///
/// Field names double as environment variable names (upper-cased) and YAML keys:
/// ```yaml
/// search_query: "is:issue created:2024-01-01..2024-01-31"
/// repository_url: "https://github.com/owner/repo"
/// output_file: "issue_metrics.md"
/// ```
#[derive(Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// GitHub search filter, without the `repo:` qualifier
    #[serde(default)]
    pub search_query: String,

    /// Full URL of the repository to search
    #[serde(default)]
    pub repository_url: String,

    /// Personal access token. Falls back to the GH_TOKEN variable when unset
    #[serde(default)]
    pub gh_token: Option<String>,

    /// Where the Markdown report is written
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

fn default_output_file() -> String {
    DEFAULT_REPORT_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            repository_url: String::new(),
            gh_token: None,
            output_file: default_output_file(),
        }
    }
}

// Keep the token out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("search_query", &self.search_query)
            .field("repository_url", &self.repository_url)
            .field("gh_token", &self.gh_token.as_ref().map(|_| "<redacted>"))
            .field("output_file", &self.output_file)
            .finish()
    }
}

impl Config {
    /// Load from SEARCH_QUERY, REPOSITORY_URL, GH_TOKEN and OUTPUT_FILE.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Replace loaded values with any provided on the command line.
    pub fn with_overrides(
        mut self,
        search_query: Option<String>,
        repository_url: Option<String>,
        output_file: Option<String>,
    ) -> Self {
        if let Some(query) = search_query {
            self.search_query = query;
        }
        if let Some(url) = repository_url {
            self.repository_url = url;
        }
        if let Some(output) = output_file {
            self.output_file = output;
        }
        self
    }
}
