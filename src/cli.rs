// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is described by Rust structs
// and attributes, and clap generates the parsing, --help and --version.
//
// Global options (--api-url, --debounce-ms, -v) apply to every subcommand
// and can also come from DEV_FINDER_* environment variables.
//
// SessionCommand covers the lines typed inside the interactive search.
// =============================================================================

use clap::{ArgAction, Parser, Subcommand};

use crate::config::{DEFAULT_API_URL, DEFAULT_DEBOUNCE_MS};

#[derive(Parser, Debug)]
#[command(
    name = "dev-finder",
    version,
    about = "Look up GitHub users and browse their repositories",
    long_about = "dev-finder searches GitHub profiles as you type and pages through \
                  their public repositories, five at a time."
)]
pub struct Cli {
    /// Root of the GitHub REST API
    #[arg(long, global = true, env = "DEV_FINDER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Quiet period in milliseconds before a typed search runs
    #[arg(long, global = true, env = "DEV_FINDER_DEBOUNCE_MS", default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive search: type a username, page with :next / :prev
    ///
    /// Example: dev-finder search
    Search,

    /// Look up one user and print a single page of repositories
    ///
    /// Example: dev-finder user octocat --page 2
    User {
        /// GitHub login to look up
        login: String,

        /// Repository page to show (5 repositories per page)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Output the result as JSON instead of a profile card
        #[arg(long)]
        json: bool,
    },
}

/// One line typed into the interactive search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Plain text: goes into the search box
    Search(String),
    Next,
    Prev,
    Page(u32),
    /// `:page` without a usable number
    PageUsage,
    Help,
    Quit,
    /// Any other line starting with ':'
    Unknown(String),
}

impl SessionCommand {
    // Lines starting with ':' are commands and never reach the search box
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            ":q" | ":quit" => Self::Quit,
            ":n" | ":next" => Self::Next,
            ":p" | ":prev" => Self::Prev,
            ":h" | ":help" => Self::Help,
            _ => {
                if let Some(rest) = trimmed.strip_prefix(":page") {
                    match rest.trim().parse::<u32>() {
                        Ok(page) => Self::Page(page),
                        _ => Self::PageUsage,
                    }
                } else if trimmed.starts_with(':') {
                    Self::Unknown(trimmed.to_string())
                } else {
                    Self::Search(line.to_string())
                }
            }
        }
    }
}
