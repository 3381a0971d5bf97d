mod schema;
mod validation;

pub use schema::Config;
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/issue-metrics/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("issue-metrics"))
}

/// Get the default config file path (~/.config/issue-metrics/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration.
///
/// An explicit `path` must exist and is parsed as YAML. Without one, the default
/// config file is used if present; otherwise values come from the environment.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("Config file not found at {}", path.display());
        }
        return load_config_file(&path);
    }

    match get_config_path() {
        Some(default_path) if default_path.exists() => {
            tracing::debug!(path = %default_path.display(), "Loading default config file");
            load_config_file(&default_path)
        }
        _ => Config::from_env().context("Failed to read configuration from environment"),
    }
}

/// Load configuration from a YAML file
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    parse_config(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))
}

fn parse_config(content: &str) -> Result<Config> {
    Ok(serde_saphyr::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
search_query: "is:issue is:closed"
repository_url: "https://github.com/owner/repo"
gh_token: "ghp_example"
output_file: "report.md"
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.search_query, "is:issue is:closed");
        assert_eq!(config.repository_url, "https://github.com/owner/repo");
        assert_eq!(config.gh_token.as_deref(), Some("ghp_example"));
        assert_eq!(config.output_file, "report.md");
    }

    #[test]
    fn test_parse_config_defaults() {
        let yaml = r#"
search_query: "is:pr"
repository_url: "https://github.com/owner/repo"
"#;
        let config = parse_config(yaml).unwrap();
        assert!(config.gh_token.is_none());
        assert_eq!(config.output_file, "issue_metrics.md");
    }

    #[test]
    fn test_parse_config_invalid_yaml() {
        assert!(parse_config("search_query: [unterminated").is_err());
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let path = env::temp_dir().join("issue_metrics_missing_config.yaml");
        let _ = fs::remove_file(&path);

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = env::temp_dir().join("issue_metrics_test_config.yaml");
        fs::write(
            &path,
            "search_query: \"is:issue\"\nrepository_url: \"https://github.com/a/b\"\n",
        )
        .unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.search_query, "is:issue");
        assert_eq!(config.repository_url, "https://github.com/a/b");

        let _ = fs::remove_file(&path);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        env::set_var("SEARCH_QUERY", "is:issue label:bug");
        env::set_var("REPOSITORY_URL", "https://github.com/owner/repo");
        env::set_var("GH_TOKEN", "ghp_env");
        env::remove_var("OUTPUT_FILE");

        let config = Config::from_env().expect("Failed to load config");

        assert_eq!(config.search_query, "is:issue label:bug");
        assert_eq!(config.repository_url, "https://github.com/owner/repo");
        assert_eq!(config.gh_token.as_deref(), Some("ghp_env"));
        assert_eq!(config.output_file, "issue_metrics.md");

        env::remove_var("SEARCH_QUERY");
        env::remove_var("REPOSITORY_URL");
        env::remove_var("GH_TOKEN");
    }

    #[test]
    #[serial]
    fn test_config_from_env_missing_vars_left_empty() {
        env::remove_var("SEARCH_QUERY");
        env::remove_var("REPOSITORY_URL");

        let config = Config::from_env().expect("Failed to load config");
        assert!(config.search_query.is_empty());
        assert!(config.repository_url.is_empty());
    }

    #[test]
    fn test_with_overrides() {
        let config = Config {
            search_query: "is:issue".to_string(),
            repository_url: "https://github.com/a/b".to_string(),
            ..Config::default()
        }
        .with_overrides(Some("is:pr".to_string()), None, Some("out.md".to_string()));

        assert_eq!(config.search_query, "is:pr");
        assert_eq!(config.repository_url, "https://github.com/a/b");
        assert_eq!(config.output_file, "out.md");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            gh_token: Some("ghp_secret".to_string()),
            ..Config::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
