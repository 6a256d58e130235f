use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification carried by every failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    RateLimited,
    UpstreamError,
}

/// How upstream-side failures are surfaced on the wire.
///
/// `Collapsed` keeps the historical contract where everything except input
/// validation is reported as 404. `Distinct` reports rate limiting as 429 and
/// other upstream failures as 502.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    #[default]
    Collapsed,
    Distinct,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("{0}")]
    Upstream(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::RateLimited(_) => ErrorKind::RateLimited,
            Self::Upstream(_) => ErrorKind::UpstreamError,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::RateLimited(msg)
            | Self::Upstream(msg) => msg,
        }
    }

    pub fn status_code(&self, policy: StatusPolicy) -> StatusCode {
        match (self.kind(), policy) {
            (ErrorKind::BadRequest, _) => StatusCode::BAD_REQUEST,
            (ErrorKind::NotFound, _) => StatusCode::NOT_FOUND,
            (ErrorKind::RateLimited, StatusPolicy::Distinct) => StatusCode::TOO_MANY_REQUESTS,
            (ErrorKind::UpstreamError, StatusPolicy::Distinct) => StatusCode::BAD_GATEWAY,
            (_, StatusPolicy::Collapsed) => StatusCode::NOT_FOUND,
        }
    }

    /// Renders the error as `{"error": "<message>"}` with the status chosen by `policy`.
    pub fn to_response(&self, policy: StatusPolicy) -> HttpResponse {
        HttpResponse::build(self.status_code(policy)).json(ErrorBody {
            error: self.message(),
        })
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Upstream("GitHub API request timed out".to_string())
        } else if err.is_decode() {
            Self::Upstream("Failed to parse response from GitHub API".to_string())
        } else {
            Self::Upstream("Failed to fetch from GitHub API".to_string())
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/models/common/error.rs"]
mod tests;
