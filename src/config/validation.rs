use super::schema::Config;
use crate::github::RepoId;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.search_query.trim().is_empty() {
        errors.push("search_query: not set (SEARCH_QUERY)".to_string());
    }

    if config.repository_url.trim().is_empty() {
        errors.push("repository_url: not set (REPOSITORY_URL)".to_string());
    } else if let Err(e) = RepoId::from_url(&config.repository_url) {
        errors.push(format!(
            "repository_url: invalid '{}' - {}",
            config.repository_url, e
        ));
    }

    if config.output_file.trim().is_empty() {
        errors.push("output_file: must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
