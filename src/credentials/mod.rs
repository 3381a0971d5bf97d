use std::fmt;

use crate::config::Config;

/// Environment variable holding the GitHub token
pub const ENV_TOKEN_VAR: &str = "GH_TOKEN";

#[derive(Debug, PartialEq, Eq)]
pub enum CredentialError {
    TokenNotFound,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::TokenNotFound => write!(
                f,
                "{} environment variable not set (or gh_token missing from config)",
                ENV_TOKEN_VAR
            ),
        }
    }
}

impl std::error::Error for CredentialError {}

fn non_empty(token: &str) -> Option<String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Check for a GitHub token in the GH_TOKEN environment variable.
/// Returns Some(token) if the env var is set and non-empty, None otherwise.
pub fn get_token_from_env() -> Option<String> {
    std::env::var(ENV_TOKEN_VAR).ok().as_deref().and_then(non_empty)
}

/// Resolve the token: config first, then the environment
pub fn resolve_token(config: &Config) -> Result<String, CredentialError> {
    config
        .gh_token
        .as_deref()
        .and_then(non_empty)
        .or_else(get_token_from_env)
        .ok_or(CredentialError::TokenNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_config_token_wins() {
        env::set_var(ENV_TOKEN_VAR, "from_env");
        let config = Config {
            gh_token: Some("  from_config \n".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_token(&config).unwrap(), "from_config");
        env::remove_var(ENV_TOKEN_VAR);
    }

    #[test]
    #[serial]
    fn test_falls_back_to_env() {
        env::set_var(ENV_TOKEN_VAR, "from_env");
        let config = Config {
            gh_token: Some("   ".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_token(&config).unwrap(), "from_env");
        env::remove_var(ENV_TOKEN_VAR);
    }

    #[test]
    #[serial]
    fn test_missing_token() {
        env::remove_var(ENV_TOKEN_VAR);
        let err = resolve_token(&Config::default()).unwrap_err();
        assert_eq!(err, CredentialError::TokenNotFound);
        assert!(err.to_string().contains("GH_TOKEN"));
    }

    #[test]
    #[serial]
    fn test_empty_env_token_is_absent() {
        env::set_var(ENV_TOKEN_VAR, "  ");
        assert_eq!(get_token_from_env(), None);
        env::remove_var(ENV_TOKEN_VAR);
    }
}
