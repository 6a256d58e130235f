use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubUserDto {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub login: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub avatar_url: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubRepoDto {
    pub id: u64,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub html_url: String,
    #[serde(default)]
    pub readme_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub created_at: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubCommitAuthorDto {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubCommitDetailDto {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub message: String,
    #[serde(default)]
    pub author: Option<GithubCommitAuthorDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubCommitDto {
    #[serde(default)]
    pub commit: GithubCommitDetailDto,
}

/// Search results keep their items untouched; they are already a preview shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubSearchDto {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<Value>,
}

/// Error payload GitHub returns alongside non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubErrorDto {
    #[serde(default)]
    pub message: Option<String>,
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "../../../tests/providers/github/github_dtos.rs"]
mod tests;
