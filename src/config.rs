//! esa.io connection settings.
//!
//! Built once at startup from CLI flags or the `ESA_TOKEN` / `ESA_TEAM_NAME`
//! environment variables and handed to [`EsaClient`](crate::EsaClient).

use std::fmt;
use std::time::Duration;

use crate::error::{McpError, Result};

/// Default esa.io API root.
pub const DEFAULT_API_URL: &str = "https://api.esa.io/v1";

/// Environment variable holding the esa.io access token.
pub const TOKEN_ENV_VAR: &str = "ESA_TOKEN";

/// Environment variable holding the esa.io team name.
pub const TEAM_ENV_VAR: &str = "ESA_TEAM_NAME";

/// Connection settings for one esa.io team.
#[derive(Clone)]
pub struct EsaConfig {
    token: String,
    team: String,
    api_url: String,
    timeout: Option<Duration>,
}

impl EsaConfig {
    /// Create a configuration for `team`, authenticated with `token`.
    ///
    /// Both values are required; an empty one is a startup error.
    pub fn new(token: impl Into<String>, team: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let team = team.into();

        if token.trim().is_empty() {
            return Err(McpError::Config(format!("{TOKEN_ENV_VAR} is not defined")));
        }
        if team.trim().is_empty() {
            return Err(McpError::Config(format!("{TEAM_ENV_VAR} is not defined")));
        }

        Ok(Self {
            token,
            team,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        })
    }

    /// Point the client at a different API root (e.g. a mock server).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set a request timeout. Without one the transport default applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Team name.
    pub fn team(&self) -> &str {
        &self.team
    }

    /// API root without trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Request timeout, if one was configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// `GET /user` endpoint. Not scoped to the team.
    pub fn user_url(&self) -> String {
        format!("{}/user", self.api_url)
    }

    /// Collection endpoint for the team's posts.
    pub fn posts_url(&self) -> String {
        format!("{}/teams/{}/posts", self.api_url, self.team)
    }

    /// Endpoint for a single post.
    pub fn post_url(&self, post_number: i64) -> String {
        format!("{}/{}", self.posts_url(), post_number)
    }
}

impl fmt::Debug for EsaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EsaConfig")
            .field("token", &"<redacted>")
            .field("team", &self.team)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = EsaConfig::new("secret", "docs").unwrap();
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.user_url(), "https://api.esa.io/v1/user");
        assert_eq!(config.posts_url(), "https://api.esa.io/v1/teams/docs/posts");
        assert_eq!(config.post_url(42), "https://api.esa.io/v1/teams/docs/posts/42");
    }

    #[test]
    fn test_api_url_override_trims_slash() {
        let config = EsaConfig::new("secret", "docs")
            .unwrap()
            .with_api_url("http://127.0.0.1:8080/");
        assert_eq!(config.user_url(), "http://127.0.0.1:8080/user");
    }

    #[test]
    fn test_missing_values_rejected() {
        let err = EsaConfig::new("", "docs").unwrap_err();
        assert!(err.to_string().contains("ESA_TOKEN"));

        let err = EsaConfig::new("secret", "  ").unwrap_err();
        assert!(err.to_string().contains("ESA_TEAM_NAME"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = EsaConfig::new("secret", "docs").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("docs"));
    }
}
