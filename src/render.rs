// src/render.rs
// =============================================================================
// Turns a ViewModel into terminal output.
//
// Two formats, like every command's --json switch:
// - a human view: error line, profile card, repository table, page controls
// - pretty-printed JSON of the whole view model
// =============================================================================

use anyhow::Result;

use crate::github::{Profile, RepoSummary};
use crate::search::{ErrorKind, PageState, SearchError, ViewModel};

// Prints the view either as text or JSON
pub fn print_view(view: &ViewModel, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", render_view(view));
    }
    Ok(())
}

/// Text rendering of the whole view.
pub fn render_view(view: &ViewModel) -> String {
    let mut out = String::new();

    if let Some(error) = &view.error {
        out.push_str(&render_error(error));
    }

    if let Some(profile) = &view.profile {
        out.push_str(&render_profile(profile));

        if !view.repos.is_empty() {
            out.push('\n');
            out.push_str(&render_repos(&view.repos));
        } else if profile.public_repo_count == 0 {
            out.push_str("\n📭 No public repositories\n");
        }

        if view.pages.total_pages > 0 {
            out.push_str(&format!("\n{}\n", render_pagination(&view.pages)));
        }
    }

    out
}

// A failed profile lookup is fatal for the view; a failed repository page is not
fn render_error(error: &SearchError) -> String {
    let icon = match error.kind {
        ErrorKind::Profile => "❌",
        ErrorKind::Repositories => "⚠️ ",
    };
    format!("{icon} {error}\n")
}

fn render_profile(profile: &Profile) -> String {
    format!(
        "👤 {} (@{})\n   {} followers · {} following · {} repos\n   🖼  {}\n   🔗 {}\n",
        profile.display_name(),
        profile.login,
        profile.followers_count,
        profile.following_count,
        profile.public_repo_count,
        profile.avatar_url,
        profile.profile_url,
    )
}

fn render_repos(repos: &[RepoSummary]) -> String {
    let mut out = format!(
        "{:<30} {:>7} {:>7} {:<12} {}\n",
        "NAME", "STARS", "FORKS", "LANGUAGE", "DESCRIPTION"
    );
    out.push_str(&"=".repeat(100));
    out.push('\n');

    for repo in repos {
        out.push_str(&format!(
            "{:<30} {:>7} {:>7} {:<12} {}\n",
            truncate(&repo.name, 30),
            repo.star_count,
            repo.fork_count,
            repo.primary_language.as_deref().unwrap_or("-"),
            truncate(repo.description.as_deref().unwrap_or(""), 40),
        ));
    }

    out
}

/// Page controls; a disabled direction is shown without its key.
pub fn render_pagination(pages: &PageState) -> String {
    let prev = if pages.has_prev() { "◀ :prev" } else { "◀" };
    let next = if pages.has_next() { ":next ▶" } else { "▶" };
    format!("{prev}   page {} of {}   {next}", pages.current_page, pages.total_pages)
}

// Cuts a string to at most `max` characters, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
