// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Two read-only endpoints:
// - GET /users/{login}                              -> Profile
// - GET /users/{login}/repos?page={n}&per_page=5    -> Vec<RepoSummary>
//
// Any non-2xx answer becomes a FetchError whose Display text is exactly the
// message the user sees ("User not found. Status: 404", ...).
//
// Rust concepts:
// - async functions: For network I/O
// - thiserror: Typed errors with a Display message per variant
// - url::Url: Building paths and query strings without manual escaping
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use super::models::{Profile, RepoSummary, REPOS_PER_PAGE};
use super::UserApi;

// Errors produced while fetching from GitHub
//
// Each variant's message is shown to the user as-is.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Profile endpoint answered with a non-2xx status
    #[error("User not found. Status: {status}")]
    UserNotFound { status: u16 },

    /// Repository endpoint answered with a non-2xx status
    #[error("Failed to fetch repositories. Status: {status}")]
    Repositories { status: u16 },

    /// Network failure or a profile body that is not the JSON we expect
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Network failure or an undecodable body on the repository endpoint
    #[error("Failed to fetch repositories: {0}")]
    RepositoriesRequest(#[source] reqwest::Error),

    /// The configured API base URL cannot carry a path
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The configured User-Agent is not a valid header value
    #[error("Invalid user agent: {0}")]
    InvalidUserAgent(String),
}

// HTTP client for the GitHub users API
//
// Cloning is cheap: reqwest::Client is reference counted internally.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    // Creates a client against the given API root (normally https://api.github.com)
    //
    // GitHub rejects requests without a User-Agent, so we always send one.
    pub fn new(base_url: Url, user_agent: &str) -> Result<Self, FetchError> {
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        let agent = HeaderValue::from_str(user_agent)
            .map_err(|_| FetchError::InvalidUserAgent(user_agent.to_string()))?;
        headers.insert(USER_AGENT, agent);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client, base_url })
    }

    // Builds {base}/users/{login}[/...], escaping the login as one path segment
    fn users_url(&self, login: &str, extra: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push("users").push(login).extend(extra);
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> reqwest::Result<Response> {
        debug!(%url, "GET");
        self.client.get(url).send().await
    }
}

#[async_trait]
impl UserApi for GitHubClient {
    async fn fetch_profile(&self, login: &str) -> Result<Profile, FetchError> {
        let url = self.users_url(login, &[])?;
        let response = self.get(url).await?;

        let status = response.status();
        if !status.is_success() {
            info!(login, status = status.as_u16(), "profile lookup failed");
            return Err(FetchError::UserNotFound {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Profile>().await?)
    }

    async fn fetch_repos(&self, login: &str, page: u32) -> Result<Vec<RepoSummary>, FetchError> {
        let mut url = self.users_url(login, &["repos"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &REPOS_PER_PAGE.to_string());

        let response = self
            .get(url)
            .await
            .map_err(FetchError::RepositoriesRequest)?;

        let status = response.status();
        if !status.is_success() {
            info!(login, page, status = status.as_u16(), "repository page failed");
            return Err(FetchError::Repositories {
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<RepoSummary>>()
            .await
            .map_err(FetchError::RepositoriesRequest)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why path_segments_mut() instead of format!()?
//    - A login typed by the user could contain '/', '?', spaces, ...
//    - push() percent-encodes the segment, so "a/b" can never escape the path
//
// 2. What does #[from] do in the error enum?
//    - It generates From<reqwest::Error> for FetchError
//    - That is what lets us use ? on reqwest calls inside these functions
//    - The repository path maps its reqwest errors explicitly instead, so a
//      broken repository page never reads like a failed profile lookup
//
// 3. Why #[async_trait]?
//    - The controller holds an Arc<dyn UserApi> so tests can swap in a fake
//    - async_trait makes async trait methods usable behind dyn
// -----------------------------------------------------------------------------
