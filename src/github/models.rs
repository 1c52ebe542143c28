// src/github/models.rs
// =============================================================================
// Data returned by the two GitHub endpoints we call.
//
// The JSON field names come from the GitHub REST API (avatar_url, followers,
// stargazers_count, ...). We rename them onto our own field names with
// #[serde(rename = "...")] so the rest of the app never sees API naming.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Number of repositories requested per page.
pub const REPOS_PER_PAGE: u32 = 5;

/// A GitHub user profile from `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    /// Display name; many accounts never set one
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(rename = "followers")]
    pub followers_count: u64,
    #[serde(rename = "following")]
    pub following_count: u64,
    #[serde(rename = "public_repos")]
    pub public_repo_count: u32,
    #[serde(rename = "html_url")]
    pub profile_url: String,
}

impl Profile {
    /// Number of repository pages for this profile.
    ///
    /// ceil(public_repo_count / REPOS_PER_PAGE), so 0 repos means 0 pages.
    pub fn total_pages(&self) -> u32 {
        self.public_repo_count.div_ceil(REPOS_PER_PAGE)
    }

    /// Name to show on the profile card.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("No Name Provided")
    }
}

/// One entry of `GET /users/{login}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "html_url")]
    pub url: String,
    #[serde(rename = "stargazers_count")]
    pub star_count: u64,
    #[serde(rename = "forks_count")]
    pub fork_count: u64,
    #[serde(rename = "language")]
    pub primary_language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_repos(count: u32) -> Profile {
        Profile {
            login: "octocat".to_string(),
            name: None,
            avatar_url: String::new(),
            followers_count: 0,
            following_count: 0,
            public_repo_count: count,
            profile_url: String::new(),
        }
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(profile_with_repos(0).total_pages(), 0);
        assert_eq!(profile_with_repos(1).total_pages(), 1);
        assert_eq!(profile_with_repos(5).total_pages(), 1);
        assert_eq!(profile_with_repos(12).total_pages(), 3);
        assert_eq!(profile_with_repos(20).total_pages(), 4);
    }

    #[test]
    fn test_profile_from_api_json() {
        // Extra fields GitHub sends (id, bio, ...) are ignored
        let json = r#"{
            "login": "octocat",
            "id": 583231,
            "name": "The Octocat",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "followers": 17000,
            "following": 9,
            "public_repos": 8,
            "bio": null,
            "html_url": "https://github.com/octocat"
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.display_name(), "The Octocat");
        assert_eq!(profile.followers_count, 17000);
        assert_eq!(profile.public_repo_count, 8);
        assert_eq!(profile.profile_url, "https://github.com/octocat");
    }

    #[test]
    fn test_missing_name_falls_back() {
        let json = r#"{
            "login": "ghost",
            "name": null,
            "avatar_url": "",
            "followers": 0,
            "following": 0,
            "public_repos": 0,
            "html_url": "https://github.com/ghost"
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.display_name(), "No Name Provided");
    }

    #[test]
    fn test_repo_from_api_json() {
        let json = r#"[{
            "id": 1296269,
            "name": "Hello-World",
            "description": null,
            "html_url": "https://github.com/octocat/Hello-World",
            "stargazers_count": 80,
            "forks_count": 9,
            "language": "Rust"
        }]"#;

        let repos: Vec<RepoSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].star_count, 80);
        assert_eq!(repos[0].fork_count, 9);
        assert_eq!(repos[0].description, None);
        assert_eq!(repos[0].primary_language.as_deref(), Some("Rust"));
    }
}
