// src/search/controller.rs
// =============================================================================
// The profile search controller.
//
// One tokio task owns the SearchState and handles one event at a time:
// - commands from the UI (new term, next page, previous page, shutdown)
// - the debounce timer firing
// - fetch results coming back
//
// Fetches run as their own tasks and report back over a channel. They are
// never cancelled; the state machine drops answers that arrive too late.
// Every change to the view model is published on a watch channel.
//
// Rust concepts:
// - tokio::select!: Wait on several event sources at once
// - mpsc / watch channels: Message passing instead of shared locks
// - Arc<dyn Trait>: Share one API client between tasks
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use super::debounce::Debouncer;
use super::state::{Effect, Outcome, SearchState, ViewModel};
use crate::github::UserApi;

// Messages from the UI to the controller task
#[derive(Debug)]
enum Command {
    Search(String),
    Next,
    Prev,
    GoTo(u32),
    Shutdown,
}

/// Cheap, cloneable way to send input to a running controller.
///
/// Sending to a controller that has shut down is silently ignored.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl ControllerHandle {
    /// Reports a new raw search term and restarts the debounce timer.
    pub fn search(&self, term: impl Into<String>) {
        self.send(Command::Search(term.into()));
    }

    pub fn next_page(&self) {
        self.send(Command::Next);
    }

    pub fn prev_page(&self) {
        self.send(Command::Prev);
    }

    pub fn go_to_page(&self, page: u32) {
        self.send(Command::GoTo(page));
    }

    fn send(&self, command: Command) {
        if let Err(err) = self.commands.send(command) {
            debug!(command = ?err.0, "controller stopped, command ignored");
        }
    }
}

/// Owns the controller task. Create with `spawn`, stop with `shutdown`.
pub struct ProfileSearchController {
    handle: ControllerHandle,
    view: watch::Receiver<ViewModel>,
    task: JoinHandle<()>,
}

impl ProfileSearchController {
    /// Starts the controller task on the current tokio runtime.
    pub fn spawn(api: Arc<dyn UserApi>, quiet_period: Duration) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(ViewModel::default());

        let task = tokio::spawn(run(api, quiet_period, commands_rx, view_tx));

        Self {
            handle: ControllerHandle {
                commands: commands_tx,
            },
            view: view_rx,
            task,
        }
    }

    pub fn handle(&self) -> ControllerHandle {
        self.handle.clone()
    }

    /// Snapshot of the current view model.
    pub fn view(&self) -> ViewModel {
        self.view.borrow().clone()
    }

    /// Receiver that wakes on every view model change.
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.view.clone()
    }

    /// Stops the controller task and waits for it to exit.
    ///
    /// Fetches already in flight still run to completion; their results are discarded.
    pub async fn shutdown(self) {
        self.handle.send(Command::Shutdown);
        if let Err(err) = self.task.await {
            warn!(error = %err, "controller task ended abnormally");
        }
    }
}

/// Performs one Effect against the API and packages the answer.
pub async fn execute(api: &dyn UserApi, effect: Effect) -> Outcome {
    match effect {
        Effect::FetchProfile { id, login } => Outcome::Profile {
            id,
            result: api.fetch_profile(&login).await.map_err(|e| e.to_string()),
        },
        Effect::FetchRepos {
            request,
            login,
            page,
        } => Outcome::Repos {
            request,
            page,
            result: api
                .fetch_repos(&login, page)
                .await
                .map_err(|e| e.to_string()),
        },
    }
}

// The controller's event loop
async fn run(
    api: Arc<dyn UserApi>,
    quiet_period: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
    view: watch::Sender<ViewModel>,
) {
    let mut state = SearchState::new();
    let mut debouncer = Debouncer::new(quiet_period);
    let (outcomes_tx, mut outcomes) = mpsc::unbounded_channel();

    loop {
        let deadline = debouncer.deadline();

        let effect = tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Search(term)) => {
                    state.term_changed(&term);
                    debouncer.push(term, Instant::now());
                    None
                }
                Some(Command::Next) => state.next_page(),
                Some(Command::Prev) => state.prev_page(),
                Some(Command::GoTo(page)) => state.go_to_page(page),
                Some(Command::Shutdown) | None => break,
            },
            Some(outcome) = outcomes.recv() => state.apply(outcome),
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                match debouncer.take_if_elapsed(Instant::now()) {
                    Some(term) => {
                        info!(term = %term, "search term settled");
                        state.settle(&term)
                    }
                    None => None,
                }
            }
        };

        if let Some(effect) = effect {
            spawn_fetch(Arc::clone(&api), effect, outcomes_tx.clone());
        }

        let current = state.view();
        view.send_if_modified(|published| {
            if published == current {
                false
            } else {
                *published = current.clone();
                true
            }
        });
    }

    debug!("controller stopped");
}

fn spawn_fetch(api: Arc<dyn UserApi>, effect: Effect, outcomes: mpsc::UnboundedSender<Outcome>) {
    debug!(?effect, "starting fetch");
    tokio::spawn(async move {
        let outcome = execute(api.as_ref(), effect).await;
        // Fails only if the controller is gone, and then nobody needs the answer
        let _ = outcomes.send(outcome);
    });
}
