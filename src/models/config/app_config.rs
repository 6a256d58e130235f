use serde::{Deserialize, Serialize};

use crate::models::common::StatusPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub status_policy: StatusPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            status_policy: StatusPolicy::Collapsed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_token: Option<String>,
    pub api_url: String,
    pub timeout_secs: u64,
    /// Number of commits returned for a repository.
    pub commit_limit: usize,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_url: "https://api.github.com".to_string(),
            timeout_secs: 10,
            commit_limit: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub github: GithubConfig,
}

impl AppConfig {
    /// Returns the API token when one is configured and not blank.
    pub fn token(&self) -> Option<&str> {
        self.github
            .api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
