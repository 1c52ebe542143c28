// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and build the Config
// 2. Set up logging (tracing) on stderr
// 3. Dispatch to the interactive search or the one-shot user lookup
// 4. Exit with proper code (0 = success, 1 = lookup failed, 2 = error)
// =============================================================================

mod cli;
mod config;
mod github;
mod render;
mod search;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, SessionCommand};
use config::Config;
use github::{GitHubClient, UserApi};
use search::{ControllerHandle, Phase, ProfileSearchController, SearchInput};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected error: print the whole context chain and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = lookup succeeded / session ended normally
//   Ok(1) = the user or their repositories could not be fetched
//   Err   = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_cli(&cli)?;
    debug!(?config, "configuration loaded");

    let api = GitHubClient::new(config.api_url.clone(), &config.user_agent)
        .context("Failed to create GitHub client")?;

    match cli.command {
        Commands::Search => handle_search(Arc::new(api), &config).await,
        Commands::User { login, page, json } => handle_user(&api, &login, page, json).await,
    }
}

// RUST_LOG wins; otherwise -v / -vv raise the default level
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dev_finder={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Handles the 'search' subcommand
//
// Every line typed is entered into the search box and submitted; lines
// starting with ':' are commands. Results are printed as they arrive.
async fn handle_search(api: Arc<dyn UserApi>, config: &Config) -> Result<i32> {
    let controller = ProfileSearchController::spawn(api, config.debounce);
    let handle = controller.handle();

    // Print every settled view; skip the in-between debouncing states
    let mut updates = controller.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let view = updates.borrow_and_update().clone();
            match view.phase {
                Phase::Loading => println!("⏳ Loading..."),
                Phase::Success | Phase::Error => {
                    if let Err(e) = render::print_view(&view, false) {
                        warn!(error = %e, "failed to render view");
                    }
                }
                Phase::Idle | Phase::Debouncing => {}
            }
        }
    });

    println!("🔍 Type a GitHub username and press Enter (:help for commands)");

    let mut input = SearchInput::new(|term| handle.search(term));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
        match SessionCommand::parse(&line) {
            SessionCommand::Quit => break,
            SessionCommand::Search(text) => {
                input.edit(text);
                debug!(term = input.value(), "search submitted");
                input.submit();
            }
            command => run_command(command, &handle),
        }
    }

    let last = controller.view();
    debug!(phase = ?last.phase, term = %last.settled_term, "search session ended");
    controller.shutdown().await;
    // The printer ends once the controller's watch sender is dropped
    printer.await.context("Output task failed")?;

    Ok(0)
}

// Page and help commands; search text and :quit are handled by the caller
fn run_command(command: SessionCommand, handle: &ControllerHandle) {
    match command {
        SessionCommand::Next => handle.next_page(),
        SessionCommand::Prev => handle.prev_page(),
        SessionCommand::Page(page) => handle.go_to_page(page),
        SessionCommand::PageUsage => println!("Usage: :page <number>"),
        SessionCommand::Unknown(command) => {
            println!("Unknown command: {command}");
            print_help();
        }
        SessionCommand::Help | SessionCommand::Search(_) | SessionCommand::Quit => print_help(),
    }
}

fn print_help() {
    println!("Commands:");
    println!("   <text>        search for a GitHub user");
    println!("   :next, :n     next page of repositories");
    println!("   :prev, :p     previous page of repositories");
    println!("   :page <n>     jump to page n");
    println!("   :quit, :q     exit");
}

// Handles the 'user' subcommand
//
// Same state machine as the interactive search, minus the debounce.
async fn handle_user(api: &dyn UserApi, login: &str, page: u32, json: bool) -> Result<i32> {
    let view = search::lookup(api, login, page).await;
    render::print_view(&view, json)?;

    Ok(if view.error.is_some() { 1 } else { 0 })
}
