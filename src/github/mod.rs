// src/github/mod.rs
// =============================================================================
// This module handles fetching profile and repository data from GitHub.
//
// Currently implements:
// - The UserApi trait: the two lookups the search controller needs
// - GitHubClient: the real implementation over the GitHub REST API
// - Profile / RepoSummary: the data we keep from the API responses
//
// The trait is the seam between the controller and the network, so the
// controller can be tested with an in-memory fake.
// =============================================================================

mod fetch;
mod models;

use async_trait::async_trait;

// Re-export the public API of this module
pub use fetch::{FetchError, GitHubClient};
pub use models::{Profile, RepoSummary};
#[cfg(test)]
pub use models::REPOS_PER_PAGE;

/// Read-only lookups against a users API.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `GET /users/{login}`
    async fn fetch_profile(&self, login: &str) -> Result<Profile, FetchError>;

    /// `GET /users/{login}/repos?page={page}&per_page=5`
    async fn fetch_repos(&self, login: &str, page: u32) -> Result<Vec<RepoSummary>, FetchError>;
}
