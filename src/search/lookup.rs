// src/search/lookup.rs
// =============================================================================
// One-shot lookup for the 'user' subcommand.
//
// Drives the same state machine as the interactive search, without the
// debounce: the login is settled immediately and each fetch is awaited in
// turn. When a page other than 1 is wanted, the page-1 request issued after
// the profile loads is swapped for that page.
// =============================================================================

use tracing::warn;

use super::controller::execute;
use super::state::{Effect, SearchState, ViewModel};
use crate::github::UserApi;

/// Looks up `login` and loads repository page `page`.
///
/// A page past the last one falls back to page 1.
pub async fn lookup(api: &dyn UserApi, login: &str, page: u32) -> ViewModel {
    let mut state = SearchState::new();
    state.term_changed(login);
    let mut next = state.settle(login);

    while let Some(effect) = next.take() {
        let effect = match effect {
            Effect::FetchRepos { page: 1, .. } if page > 1 => match state.go_to_page(page) {
                Some(jump) => jump,
                None => {
                    warn!(
                        page,
                        total = state.view().pages.total_pages,
                        "page out of range, showing page 1"
                    );
                    effect
                }
            },
            effect => effect,
        };

        let outcome = execute(api, effect).await;
        next = state.apply(outcome);
    }

    state.view().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fake::FakeApi;
    use crate::search::state::{ErrorKind, Phase};

    #[tokio::test]
    async fn test_first_page_by_default() {
        let api = FakeApi::default().with_user("octocat", 12);

        let view = lookup(&api, "octocat", 1).await;

        assert_eq!(api.calls(), vec!["profile:octocat", "repos:octocat:1"]);
        assert_eq!(view.phase, Phase::Success);
        assert_eq!(view.pages.current_page, 1);
        assert_eq!(view.pages.total_pages, 3);
        assert_eq!(view.repos[0].name, "octocat-1-0");
    }

    #[tokio::test]
    async fn test_requested_page_replaces_page_one() {
        let api = FakeApi::default().with_user("octocat", 12);

        let view = lookup(&api, "octocat", 3).await;

        // Page 1 is never fetched
        assert_eq!(api.calls(), vec!["profile:octocat", "repos:octocat:3"]);
        assert_eq!(view.pages.current_page, 3);
        assert_eq!(view.repos[0].name, "octocat-3-0");
    }

    #[tokio::test]
    async fn test_page_past_the_end_falls_back_to_page_one() {
        let api = FakeApi::default().with_user("octocat", 12);

        let view = lookup(&api, "octocat", 9).await;

        assert_eq!(api.calls(), vec!["profile:octocat", "repos:octocat:1"]);
        assert_eq!(view.pages.current_page, 1);
        assert_eq!(view.phase, Phase::Success);
    }

    #[tokio::test]
    async fn test_unknown_user_stops_after_profile() {
        let api = FakeApi::default();

        let view = lookup(&api, "nobody", 2).await;

        assert_eq!(api.calls(), vec!["profile:nobody"]);
        assert_eq!(view.phase, Phase::Error);
        assert_eq!(
            view.error.map(|e| e.message),
            Some("User not found. Status: 404".to_string())
        );
    }

    #[tokio::test]
    async fn test_repo_failure_keeps_profile() {
        let api = FakeApi::default().with_user("octocat", 12).with_failing_repos();

        let view = lookup(&api, "octocat", 2).await;

        assert!(view.profile.is_some());
        assert!(view.repos.is_empty());
        assert_eq!(view.error.map(|e| e.kind), Some(ErrorKind::Repositories));
    }
}
