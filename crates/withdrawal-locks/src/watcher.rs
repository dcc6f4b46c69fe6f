//! Background lock watcher
//!
//! Owns a [`LockTracker`] on a single task, fetches the registry on start and
//! on credential changes, runs the one-second countdown only while something
//! is tracked, and re-fetches when every countdown has run out. Each change
//! is published as a [`LockBoard`] snapshot.

use std::sync::Arc;
use std::time::Duration;

use pool_client::{FetchResult, LockRegistry};
use pool_core::{FetchError, LockedTransaction, WatcherConfig};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::tracker::{FetchApplied, LockTracker, TickOutcome};
use crate::view::LockBoard;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WatcherError {
    #[error("Lock watcher has stopped")]
    Stopped,
}

enum Command {
    SetToken(Option<String>),
    Refresh,
    Shutdown,
}

type FetchReport = (u64, FetchResult<Vec<LockedTransaction>>);

/// Handle to a running watcher. Cheap to clone.
///
/// The watcher stops once every handle is dropped or [`shutdown`](Self::shutdown) is called.
#[derive(Clone)]
pub struct WatcherHandle {
    commands: mpsc::UnboundedSender<Command>,
    board: watch::Receiver<LockBoard>,
}

impl WatcherHandle {
    /// Replace the bearer credential. A changed credential triggers a fetch.
    pub fn set_token(&self, token: Option<String>) -> Result<(), WatcherError> {
        self.send(Command::SetToken(token))
    }

    /// Fetch the registry now.
    pub fn refresh(&self) -> Result<(), WatcherError> {
        self.send(Command::Refresh)
    }

    pub fn shutdown(&self) -> Result<(), WatcherError> {
        self.send(Command::Shutdown)
    }

    /// Latest snapshot
    pub fn board(&self) -> LockBoard {
        self.board.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LockBoard> {
        self.board.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    fn send(&self, command: Command) -> Result<(), WatcherError> {
        self.commands.send(command).map_err(|_| WatcherError::Stopped)
    }
}

/// Lock watcher builder
pub struct LockWatcher {
    registry: Arc<dyn LockRegistry>,
    config: WatcherConfig,
    token: Option<String>,
}

impl LockWatcher {
    pub fn new(registry: Arc<dyn LockRegistry>, config: WatcherConfig) -> Self {
        Self {
            registry,
            config,
            token: None,
        }
    }

    /// Credential to use for the initial fetch
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Start the watcher task. The initial fetch is issued immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(self) -> (WatcherHandle, JoinHandle<()>) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let (board_tx, board_rx) = watch::channel(LockBoard::default());

        let period = Duration::from_millis(self.config.tick_interval_ms.max(1));
        let mut task = WatcherTask {
            registry: self.registry,
            tracker: LockTracker::new(self.config.discard_stale_responses),
            token: self.token,
            period,
            ticker: None,
            commands: commands_rx,
            results_tx,
            results: results_rx,
            board: board_tx,
        };
        // Mount fetch goes out before any snapshot is observable
        task.start_fetch();
        task.publish();
        let join = tokio::spawn(task.run());

        (
            WatcherHandle {
                commands: commands_tx,
                board: board_rx,
            },
            join,
        )
    }
}

struct WatcherTask {
    registry: Arc<dyn LockRegistry>,
    tracker: LockTracker,
    token: Option<String>,
    period: Duration,
    /// Present only while the tracker has countdowns to run
    ticker: Option<Interval>,
    commands: mpsc::UnboundedReceiver<Command>,
    results_tx: mpsc::UnboundedSender<FetchReport>,
    results: mpsc::UnboundedReceiver<FetchReport>,
    board: watch::Sender<LockBoard>,
}

impl WatcherTask {
    async fn run(mut self) {
        tracing::debug!("Lock watcher started");

        loop {
            self.sync_ticker();

            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::SetToken(token)) => {
                        if token != self.token {
                            self.token = token;
                            self.start_fetch();
                        }
                    }
                    Some(Command::Refresh) => self.start_fetch(),
                    Some(Command::Shutdown) | None => break,
                },
                Some((seq, result)) = self.results.recv() => {
                    if self.tracker.finish_fetch(seq, result) == FetchApplied::Replaced {
                        // Rebuilt timers count from a fresh phase
                        self.ticker = None;
                    }
                }
                _ = next_tick(&mut self.ticker), if self.ticker.is_some() => {
                    if self.tracker.tick() == TickOutcome::Exhausted {
                        tracing::info!("All withdrawal countdowns expired, refreshing lock registry");
                        self.start_fetch();
                    }
                }
            }

            self.publish();
        }

        // In-flight fetches report into a closed channel from here on
        self.ticker = None;
        tracing::debug!("Lock watcher stopped");
    }

    /// Without a credential nothing is sent; a pending refresh stays parked
    /// until one arrives.
    fn start_fetch(&mut self) {
        let Some(token) = self.token.clone() else {
            tracing::warn!("No credential set, skipping lock registry fetch");
            self.tracker.reject_fetch(FetchError::Unauthenticated);
            return;
        };

        let seq = self.tracker.begin_fetch();
        tracing::debug!(seq, "Fetching lock registry");
        let registry = self.registry.clone();
        let results = self.results_tx.clone();
        tokio::spawn(async move {
            let result = registry.fetch_locked(Some(&token)).await;
            if results.send((seq, result)).is_err() {
                tracing::debug!(seq, "Watcher gone, dropping lock registry response");
            }
        });
    }

    fn sync_ticker(&mut self) {
        match (self.tracker.should_tick(), self.ticker.is_some()) {
            (true, false) => {
                let mut ticker = interval_at(Instant::now() + self.period, self.period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.ticker = Some(ticker);
                tracing::debug!(
                    tracked = self.tracker.tracked_count(),
                    "Countdown timer started"
                );
            }
            (false, true) => {
                self.ticker = None;
                tracing::debug!("Countdown timer stopped");
            }
            _ => {}
        }
    }

    fn publish(&self) {
        self.board.send_replace(self.tracker.board());
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
