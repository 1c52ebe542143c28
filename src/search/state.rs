// src/search/state.rs
// =============================================================================
// The search state machine.
//
// SearchState owns the view model and decides what to fetch next. It never
// touches the network itself: every transition that needs data returns an
// Effect, and the caller feeds the result back in as an Outcome. That keeps
// all of the rules below testable without a runtime or a server.
//
//   Idle ──term──> Debouncing ──settle──> Loading ──profile ok──> Loading(repos) ──> Success
//                                            │                                        │
//                                            └──profile failed──> Error     next/prev─┘
//
// Every settled search gets a new SearchId and every repository request a
// new RequestId. A profile answer for an older search, or any repository
// answer other than the one for the latest request, is dropped.
// =============================================================================

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::github::{Profile, RepoSummary};

/// Where the controller is in a search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Debouncing,
    Loading,
    Success,
    Error,
}

/// Pagination of the repository list.
///
/// `current_page` is always at least 1 and never above `total_pages` when
/// there are pages at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub current_page: u32,
    pub total_pages: u32,
}

impl PageState {
    fn empty() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// Which lookup an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Profile lookup failed: nothing is shown
    Profile,
    /// Repository page failed: the profile stays visible
    Repositories,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchError {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub phase: Phase,
    /// Last submitted text, before debouncing
    pub raw_term: String,
    /// Last text that survived the quiet period
    pub settled_term: String,
    pub profile: Option<Profile>,
    pub repos: Vec<RepoSummary>,
    pub pages: PageState,
    pub error: Option<SearchError>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            raw_term: String::new(),
            settled_term: String::new(),
            profile: None,
            repos: Vec::new(),
            pages: PageState::empty(),
            error: None,
        }
    }
}

/// Tags a profile fetch with the search that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchId(u64);

/// Tags one repository page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(u64);

/// A fetch the state machine wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchProfile {
        id: SearchId,
        login: String,
    },
    FetchRepos {
        request: RequestId,
        login: String,
        page: u32,
    },
}

/// The result of performing an Effect.
///
/// Errors are carried as their user-facing message.
#[derive(Debug, Clone)]
pub enum Outcome {
    Profile {
        id: SearchId,
        result: Result<Profile, String>,
    },
    Repos {
        request: RequestId,
        page: u32,
        result: Result<Vec<RepoSummary>, String>,
    },
}

#[derive(Debug, Default)]
pub struct SearchState {
    view: ViewModel,
    // Id of the latest settled search
    current: u64,
    // A profile lookup for `current` has not answered yet
    profile_pending: bool,
    // Last RequestId handed out
    requests: u64,
    // The only repository request whose answer is still wanted
    repos_pending: Option<RequestId>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// A new raw term was submitted; the debounce timer (re)starts.
    pub fn term_changed(&mut self, raw: &str) {
        self.view.raw_term = raw.to_string();
        self.view.phase = Phase::Debouncing;
    }

    /// The quiet period elapsed with `term` as the last value.
    ///
    /// An empty (or whitespace-only) term fetches nothing and leaves the
    /// current results on screen.
    pub fn settle(&mut self, term: &str) -> Option<Effect> {
        self.view.settled_term = term.to_string();

        let login = term.trim();
        if login.is_empty() {
            debug!("empty search term, keeping current results");
            self.view.phase = if self.profile_pending || self.repos_pending.is_some() {
                Phase::Loading
            } else {
                self.resting_phase()
            };
            return None;
        }

        self.current += 1;
        self.profile_pending = true;
        self.repos_pending = None;
        self.view.phase = Phase::Loading;

        Some(Effect::FetchProfile {
            id: SearchId(self.current),
            login: login.to_string(),
        })
    }

    /// Feeds back the result of an Effect. May ask for another fetch.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Effect> {
        match outcome {
            Outcome::Profile { id, result } => {
                if self.is_stale(id) {
                    debug!(?id, "dropping profile from superseded search");
                    return None;
                }
                self.profile_pending = false;
                match result {
                    Ok(profile) => self.profile_loaded(profile),
                    Err(message) => {
                        self.profile_failed(message);
                        None
                    }
                }
            }
            Outcome::Repos {
                request,
                page,
                result,
            } => {
                if self.repos_pending != Some(request) {
                    debug!(?request, page, "dropping superseded repository page");
                    return None;
                }
                self.repos_pending = None;
                match result {
                    Ok(repos) => self.repos_loaded(repos),
                    Err(message) => self.repos_failed(message),
                }
                None
            }
        }
    }

    /// Moves to the next page, unless already on the last one.
    pub fn next_page(&mut self) -> Option<Effect> {
        if !self.view.pages.has_next() {
            return None;
        }
        self.go_to_page(self.view.pages.current_page + 1)
    }

    /// Moves to the previous page, unless already on the first one.
    pub fn prev_page(&mut self) -> Option<Effect> {
        if !self.view.pages.has_prev() {
            return None;
        }
        self.go_to_page(self.view.pages.current_page - 1)
    }

    /// Jumps to `page`. Out of range, current, or mid-lookup requests are no-ops.
    pub fn go_to_page(&mut self, page: u32) -> Option<Effect> {
        if self.profile_pending {
            return None;
        }
        let login = self.view.profile.as_ref()?.login.clone();
        let pages = self.view.pages;
        if page < 1 || page > pages.total_pages || page == pages.current_page {
            return None;
        }

        self.view.pages.current_page = page;
        Some(self.request_repos(login, page))
    }

    // Supersedes any repository request still in flight
    fn request_repos(&mut self, login: String, page: u32) -> Effect {
        self.requests += 1;
        let request = RequestId(self.requests);
        self.repos_pending = Some(request);
        self.view.phase = Phase::Loading;

        Effect::FetchRepos {
            request,
            login,
            page,
        }
    }

    fn is_stale(&self, id: SearchId) -> bool {
        id != SearchId(self.current)
    }

    fn resting_phase(&self) -> Phase {
        if self.view.error.is_some() {
            Phase::Error
        } else if self.view.profile.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    fn profile_loaded(&mut self, profile: Profile) -> Option<Effect> {
        let total_pages = profile.total_pages();
        let login = profile.login.clone();

        self.view.profile = Some(profile);
        self.view.error = None;
        self.view.repos.clear();
        self.view.pages = PageState {
            current_page: 1,
            total_pages,
        };

        if total_pages == 0 {
            self.view.phase = Phase::Success;
            return None;
        }

        // Page 1 is always requested with the login GitHub resolved, not the typed text
        Some(self.request_repos(login, 1))
    }

    fn profile_failed(&mut self, message: String) {
        self.view.profile = None;
        self.view.repos.clear();
        self.view.pages = PageState::empty();
        self.view.error = Some(SearchError {
            kind: ErrorKind::Profile,
            message,
        });
        self.view.phase = Phase::Error;
    }

    fn repos_loaded(&mut self, repos: Vec<RepoSummary>) {
        self.view.repos = repos;
        self.view.error = None;
        self.view.phase = Phase::Success;
    }

    fn repos_failed(&mut self, message: String) {
        self.view.repos.clear();
        self.view.error = Some(SearchError {
            kind: ErrorKind::Repositories,
            message,
        });
        self.view.phase = Phase::Error;
    }
}
