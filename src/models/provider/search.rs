use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::providers::github::github_dtos::GithubSearchDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSearch {
    pub total_count: u64,
    pub items: Vec<Value>,
}

impl From<GithubSearchDto> for AccountSearch {
    fn from(dto: GithubSearchDto) -> Self {
        Self {
            total_count: dto.total_count,
            items: dto.items,
        }
    }
}
