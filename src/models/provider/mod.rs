pub mod account;
pub mod commit;
pub mod repository;
pub mod search;

pub use account::{AccountSummary, AccountWithRepos};
pub use commit::{CommitSummary, RecentCommits};
pub use repository::RepositorySummary;
pub use search::AccountSearch;
