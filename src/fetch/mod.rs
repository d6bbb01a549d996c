//! Fetching repositories into the local workspace.

pub mod git;
pub mod repository;

pub use git::{CloneResult, Fetcher, GitFetcher, DEFAULT_BASE_URL, DEFAULT_CLONE_TIMEOUT};
pub use repository::{default_repositories, is_valid_identifier, RepositorySpec};
