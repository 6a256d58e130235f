use serde::{Deserialize, Serialize};

use crate::providers::github::github_dtos::GithubCommitDto;

/// One entry of a repository's recent history.
///
/// `committer_name` and `date` come from the commit's author record, the
/// message is passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub committer_name: String,
    pub message: String,
    pub date: String,
}

impl From<GithubCommitDto> for CommitSummary {
    fn from(dto: GithubCommitDto) -> Self {
        let author = dto.commit.author.unwrap_or_default();
        Self {
            committer_name: author.name,
            message: dto.commit.message,
            date: author.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentCommits {
    pub commits: Vec<CommitSummary>,
}

#[cfg(test)]
#[path = "../../../tests/models/provider/commit.rs"]
mod tests;
