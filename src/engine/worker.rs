//! Engine event loop and renderer-facing handle
//!
//! The worker is an actor: commands from `SearchHandle` clones arrive on one
//! channel, timer firings and fetch completions on another, and the loop
//! processes exactly one event at a time against the owned `EngineCore`
//! before publishing a fresh snapshot. Fetch tasks are spawned detached and
//! never aborted; a completion that no longer matches the current term is
//! discarded by the core. The only true cancellation point is the debounce
//! timer, cut via its `CancellationToken` on every new keystroke.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use super::coordinator::{EngineCore, FetchOutcome, FetchPlan, Snapshot};
use crate::client::QueryClient;
use crate::config::EngineConfig;

/// Commands from the presentation layer
#[derive(Debug)]
enum Command {
    /// The input text changed (every keystroke, not debounced by the caller)
    QueryChanged(String),
    /// The user really scrolled the results list
    ScrollReached,
    /// The list hit its end and wants the next page
    LoadMore,
}

/// Events the worker posts to itself from spawned tasks
#[derive(Debug)]
enum Internal {
    /// A debounce timer ran to completion
    DebounceFired { generation: u64 },
    /// A fetch task finished
    FetchDone(FetchOutcome),
}

/// Handle through which the presentation layer drives and observes the engine
///
/// Cheap to clone. Commands are fire-and-forget: each method returns whether
/// the engine was still alive to receive it.
#[derive(Debug, Clone)]
pub struct SearchHandle {
    commands_tx: mpsc::UnboundedSender<Command>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

impl SearchHandle {
    /// Report a changed query term; resets per-term state synchronously and
    /// restarts the debounce timer
    pub fn query_changed(&self, term: impl Into<String>) -> bool {
        self.commands_tx
            .send(Command::QueryChanged(term.into()))
            .is_ok()
    }

    /// Report a real user scroll, un-gating pagination for this term
    pub fn scroll_reached(&self) -> bool {
        self.commands_tx.send(Command::ScrollReached).is_ok()
    }

    /// Request the next page of results for the current term
    pub fn load_more(&self) -> bool {
        self.commands_tx.send(Command::LoadMore).is_ok()
    }

    /// Current display items and loading flags
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Wait until the snapshot changes; false once the engine has shut down
    pub async fn changed(&mut self) -> bool {
        self.snapshot_rx.changed().await.is_ok()
    }
}

/// Spawn the engine event loop
///
/// The loop runs until every `SearchHandle` clone is dropped. In-flight
/// fetches finish on their own and their results are dropped with the
/// channel.
pub fn spawn_engine(
    client: Arc<dyn QueryClient + Send + Sync>,
    config: EngineConfig,
) -> SearchHandle {
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (internal_tx, internal_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::default());

    let worker = Worker {
        core: EngineCore::new(),
        client,
        config,
        internal_tx,
        snapshot_tx,
        debounce: None,
    };
    tokio::spawn(worker.run(commands_rx, internal_rx));

    SearchHandle {
        commands_tx,
        snapshot_rx,
    }
}

struct Worker {
    core: EngineCore,
    client: Arc<dyn QueryClient + Send + Sync>,
    config: EngineConfig,
    internal_tx: mpsc::UnboundedSender<Internal>,
    snapshot_tx: watch::Sender<Snapshot>,
    /// Token of the pending debounce timer, if any
    debounce: Option<CancellationToken>,
}

impl Worker {
    async fn run(
        mut self,
        mut commands_rx: mpsc::UnboundedReceiver<Command>,
        mut internal_rx: mpsc::UnboundedReceiver<Internal>,
    ) {
        loop {
            tokio::select! {
                command = commands_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    // Every handle dropped
                    None => break,
                },
                // Never yields None: the worker holds a sender itself
                Some(internal) = internal_rx.recv() => self.handle_internal(internal),
            }

            let _ = self.snapshot_tx.send(self.core.snapshot());
        }

        if let Some(token) = self.debounce.take() {
            token.cancel();
        }
        log::debug!("search engine worker shutting down");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::QueryChanged(term) => {
                let generation = self.core.note_input(&term);
                self.restart_debounce(generation);
            }
            Command::ScrollReached => self.core.mark_user_scrolled(),
            Command::LoadMore => {
                if let Some(plan) = self.core.plan_load_more() {
                    self.dispatch(plan);
                }
            }
        }
    }

    fn handle_internal(&mut self, internal: Internal) {
        match internal {
            Internal::DebounceFired { generation } => {
                // The timer may have fired and queued the event just before a
                // newer keystroke cancelled it; the generation closes that gap
                if generation != self.core.session.input_generation {
                    log::debug!("ignoring debounce firing for superseded input");
                    return;
                }
                if let Some(plan) = self.core.evaluate() {
                    self.dispatch(plan);
                }
            }
            Internal::FetchDone(outcome) => self.core.complete_fetch(outcome),
        }
    }

    /// Cancel the pending debounce timer and start one for this generation
    fn restart_debounce(&mut self, generation: u64) {
        if let Some(token) = self.debounce.take() {
            token.cancel();
        }

        let token = CancellationToken::new();
        self.debounce = Some(token.clone());

        let tx = self.internal_tx.clone();
        let quiet = Duration::from_millis(self.config.debounce_ms);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(quiet) => {
                    let _ = tx.send(Internal::DebounceFired { generation });
                }
            }
        });
    }

    /// Flip the loading flag and launch the fetch task
    fn dispatch(&mut self, plan: FetchPlan) {
        self.core.begin_fetch(&plan);

        let client = Arc::clone(&self.client);
        let tx = self.internal_tx.clone();
        let limit = self.config.page_limit;
        tokio::spawn(async move {
            let result = client.query(&plan.term, limit, plan.page).await;
            let _ = tx.send(Internal::FetchDone(FetchOutcome {
                term: plan.term,
                page: plan.page,
                mode: plan.mode,
                result,
            }));
        });
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
