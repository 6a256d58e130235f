use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::common::LookupError;
use crate::providers::github::github_dtos::GithubErrorDto;

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Authenticated access to the GitHub REST API.
///
/// Each call performs exactly one request and classifies the outcome; no
/// retries happen at this layer.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(token: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = base_url.trim().trim_end_matches('/').to_string();

        if !base.starts_with("http://") && !base.starts_with("https://") {
            base = format!("https://{}", base);
        }

        let mut headers = header::HeaderMap::new();

        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&user_agent)
                .context("Failed to create user agent header")?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let mut auth_value = header::HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .context("Failed to create authorization header")?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches `path` (relative to the API root, query string included) and
    /// returns the body as untyped JSON.
    pub async fn fetch_resource(&self, path: &str) -> Result<Value, LookupError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(path, "Requesting GitHub resource");

        let response = self.client.get(&url).send().await.map_err(|err| {
            warn!(path, error = %err, "GitHub request failed");
            LookupError::from(err)
        })?;

        // Checked before the status so an exhausted quota wins over everything else.
        if Self::rate_limit_exhausted(response.headers()) {
            match Self::rate_limit_reset(response.headers()) {
                Some(reset_at) => warn!(path, %reset_at, "GitHub API rate limit exceeded"),
                None => warn!(path, "GitHub API rate limit exceeded"),
            }
            return Err(LookupError::RateLimited(
                "GitHub API rate limit exceeded".to_string(),
            ));
        }

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<GithubErrorDto>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|msg| !msg.trim().is_empty())
                .unwrap_or_else(|| "Failed to fetch from GitHub API".to_string());
            debug!(path, %status, %message, "GitHub returned an error status");
            return Err(LookupError::Upstream(message));
        }

        response.json::<Value>().await.map_err(LookupError::from)
    }

    /// Like [`fetch_resource`](Self::fetch_resource), decoding into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LookupError> {
        let value = self.fetch_resource(path).await?;
        Self::decode(value)
    }

    pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, LookupError> {
        serde_json::from_value(value).map_err(|err| {
            debug!(error = %err, "Unexpected GitHub payload shape");
            LookupError::Upstream("Failed to parse response from GitHub API".to_string())
        })
    }

    fn rate_limit_exhausted(headers: &header::HeaderMap) -> bool {
        headers
            .get(RATE_LIMIT_REMAINING)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            == Some(0)
    }

    fn rate_limit_reset(headers: &header::HeaderMap) -> Option<DateTime<Utc>> {
        let epoch = headers
            .get(RATE_LIMIT_RESET)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())?;
        DateTime::from_timestamp(epoch, 0)
    }
}

#[cfg(test)]
#[path = "../../../tests/providers/github/github_client.rs"]
mod tests;
