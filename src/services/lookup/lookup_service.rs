use futures_util::future::try_join;
use serde_json::Value;
use tracing::{debug, info};
use url::form_urlencoded;

use crate::models::common::LookupError;
use crate::models::provider::{
    AccountSearch, AccountSummary, AccountWithRepos, CommitSummary, RecentCommits,
    RepositorySummary,
};
use crate::providers::github::GithubClient;
use crate::providers::github::github_dtos::{
    GithubCommitDto, GithubRepoDto, GithubSearchDto, GithubUserDto,
};

/// Upper bound on commits returned for a repository.
pub const MAX_RECENT_COMMITS: usize = 5;

/// Composes GitHub calls into the three lookups the server exposes and
/// narrows each payload to its caller-facing shape.
#[derive(Debug, Clone)]
pub struct LookupService {
    github: GithubClient,
    commit_limit: usize,
}

impl LookupService {
    pub fn new(github: GithubClient, commit_limit: usize) -> Self {
        Self {
            github,
            commit_limit: commit_limit.clamp(1, MAX_RECENT_COMMITS),
        }
    }

    pub async fn search_accounts(&self, query: &str) -> Result<AccountSearch, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::BadRequest(
                "Query parameter is required".to_string(),
            ));
        }

        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let search: GithubSearchDto = self
            .github
            .fetch_json(&format!("/search/users?q={}", encoded))
            .await?;

        debug!(query, total = search.total_count, "Account search completed");
        Ok(search.into())
    }

    pub async fn get_account_with_repos(
        &self,
        account: &str,
    ) -> Result<AccountWithRepos, LookupError> {
        let account = Self::path_segment(account, "User not found")?;

        let (profile, repos) = try_join(
            self.github.fetch_resource(&format!("/users/{}", account)),
            self.github.fetch_resource(&format!("/users/{}/repos", account)),
        )
        .await?;

        if Self::is_empty(&profile) {
            return Err(LookupError::NotFound("User not found".to_string()));
        }

        let profile: GithubUserDto = GithubClient::decode(profile)?;
        let repos: Vec<GithubRepoDto> = if repos.is_null() {
            Vec::new()
        } else {
            GithubClient::decode(repos)?
        };

        info!(account, repos = repos.len(), "Loaded account");
        Ok(AccountWithRepos {
            profile: AccountSummary::from(profile),
            repos: repos.into_iter().map(RepositorySummary::from).collect(),
        })
    }

    pub async fn get_recent_commits(
        &self,
        account: &str,
        repo: &str,
    ) -> Result<RecentCommits, LookupError> {
        const NO_COMMITS: &str = "No commits found for this repository";

        let account = Self::path_segment(account, NO_COMMITS)?;
        let repo = Self::path_segment(repo, NO_COMMITS)?;

        let commits = self
            .github
            .fetch_resource(&format!("/repos/{}/{}/commits", account, repo))
            .await?;

        if Self::is_empty(&commits) {
            return Err(LookupError::NotFound(NO_COMMITS.to_string()));
        }

        let Value::Array(entries) = commits else {
            return Err(LookupError::Upstream(
                "Failed to parse response from GitHub API".to_string(),
            ));
        };

        // Upstream lists newest first; its order is kept and only the head is decoded.
        let commits = entries
            .into_iter()
            .take(self.commit_limit)
            .map(|entry| GithubClient::decode::<GithubCommitDto>(entry).map(CommitSummary::from))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(account, repo, count = commits.len(), "Loaded recent commits");
        Ok(RecentCommits { commits })
    }

    /// Rejects identifiers that would escape their URL path segment.
    fn path_segment<'a>(raw: &'a str, not_found: &str) -> Result<&'a str, LookupError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.contains(['/', '?', '#', '%']) || trimmed == ".." {
            return Err(LookupError::NotFound(not_found.to_string()));
        }
        Ok(trimmed)
    }

    fn is_empty(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/services/lookup/lookup_service.rs"]
mod tests;
