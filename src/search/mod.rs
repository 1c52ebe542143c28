// src/search/mod.rs
// =============================================================================
// This module contains the search logic.
//
// Submodules:
// - input: The search box (local text + explicit submit)
// - debounce: Last-write-wins quiet-period timer
// - state: The search state machine and the view model it produces
// - controller: The tokio task that drives the state machine
// - lookup: One-shot lookup without debounce, for the 'user' subcommand
// =============================================================================

mod controller;
mod debounce;
#[cfg(test)]
mod fake;
mod input;
mod lookup;
mod state;

pub use controller::{ControllerHandle, ProfileSearchController};
pub use input::SearchInput;
pub use lookup::lookup;
pub use state::{ErrorKind, PageState, Phase, SearchError, ViewModel};
