use serde::{Deserialize, Serialize};

use crate::providers::github::github_dtos::GithubRepoDto;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<GithubRepoDto> for RepositorySummary {
    fn from(dto: GithubRepoDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            html_url: dto.html_url,
            readme_url: dto.readme_url,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}
