// src/search/fake.rs
// In-memory UserApi for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;

use crate::github::{FetchError, Profile, RepoSummary, UserApi, REPOS_PER_PAGE};

// In-memory users API that records every call
#[derive(Default)]
pub struct FakeApi {
    // login -> (public repo count, response delay)
    users: HashMap<String, (u32, Duration)>,
    repos_fail: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_user(mut self, login: &str, public_repos: u32) -> Self {
        self.users
            .insert(login.to_string(), (public_repos, Duration::ZERO));
        self
    }

    pub fn with_slow_user(mut self, login: &str, public_repos: u32, delay: Duration) -> Self {
        self.users.insert(login.to_string(), (public_repos, delay));
        self
    }

    pub fn with_failing_repos(mut self) -> Self {
        self.repos_fail = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl UserApi for FakeApi {
    async fn fetch_profile(&self, login: &str) -> Result<Profile, FetchError> {
        self.record(format!("profile:{login}"));
        let Some(&(public_repos, delay)) = self.users.get(login) else {
            return Err(FetchError::UserNotFound { status: 404 });
        };
        sleep(delay).await;

        Ok(Profile {
            // GitHub answers with the canonical login regardless of the case typed
            login: login.to_lowercase(),
            name: None,
            avatar_url: String::new(),
            followers_count: 0,
            following_count: 0,
            public_repo_count: public_repos,
            profile_url: format!("https://github.com/{login}"),
        })
    }

    async fn fetch_repos(&self, login: &str, page: u32) -> Result<Vec<RepoSummary>, FetchError> {
        self.record(format!("repos:{login}:{page}"));
        if self.repos_fail {
            return Err(FetchError::Repositories { status: 500 });
        }

        Ok((0..REPOS_PER_PAGE)
            .map(|i| RepoSummary {
                id: u64::from(page * 100 + i),
                name: format!("{login}-{page}-{i}"),
                description: None,
                url: String::new(),
                star_count: 0,
                fork_count: 0,
                primary_language: None,
            })
            .collect())
    }
}
