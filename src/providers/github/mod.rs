pub mod github_client;
pub mod github_dtos;

pub use github_client::GithubClient;
