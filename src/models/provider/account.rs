use serde::{Deserialize, Serialize};

use crate::providers::github::github_dtos::GithubUserDto;

/// Profile fields exposed to callers for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub login: String,
    pub avatar_url: String,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub bio: Option<String>,
}

impl From<GithubUserDto> for AccountSummary {
    fn from(dto: GithubUserDto) -> Self {
        Self {
            login: dto.login,
            avatar_url: dto.avatar_url,
            followers: dto.followers,
            following: dto.following,
            public_repos: dto.public_repos,
            bio: dto.bio.filter(|bio| !bio.trim().is_empty()),
        }
    }
}

/// An account profile together with its public repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountWithRepos {
    pub profile: AccountSummary,
    pub repos: Vec<super::RepositorySummary>,
}

#[cfg(test)]
#[path = "../../../tests/models/provider/account.rs"]
mod tests;
