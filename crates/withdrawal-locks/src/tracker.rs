//! Countdown state machine over the fetched lock registry
//!
//! `LockTracker` is the synchronous core: it owns the last fetched registry,
//! the local countdowns, and the fetch bookkeeping. It never performs I/O;
//! the watcher drives it with fetch results and ticks and acts on what it
//! reports back.

use pool_client::FetchResult;
use pool_core::{FetchError, LockedTransaction, TxHash};

use crate::timers::TimerState;
use crate::view::{BoardPhase, LockBoard, LockEntryView};

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// At least one countdown is still running
    Counting,
    /// Every tracked countdown reached zero on this tick; the registry must be re-fetched
    Exhausted,
    /// Nothing to count (no entries, or a refresh is already pending)
    Idle,
}

/// How a completed fetch was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    /// Registry and timers replaced
    Replaced,
    /// Error banner set, previous data kept
    Failed,
    /// Older than data already applied; ignored
    Stale,
}

#[derive(Debug, Clone)]
pub struct LockTracker {
    transactions: Vec<LockedTransaction>,
    timers: TimerState,
    error: Option<String>,
    in_flight: usize,
    awaiting_refresh: bool,
    /// Sequence number of the fetch issued for the pending exhaustion refresh
    refresh_seq: Option<u64>,
    refresh_count: u64,
    next_seq: u64,
    newest_applied: Option<u64>,
    discard_stale: bool,
}

impl LockTracker {
    /// `discard_stale` drops responses older than the newest applied one
    /// instead of letting the last one to resolve win.
    pub fn new(discard_stale: bool) -> Self {
        Self {
            transactions: Vec::new(),
            timers: TimerState::default(),
            error: None,
            in_flight: 0,
            awaiting_refresh: false,
            refresh_seq: None,
            refresh_count: 0,
            next_seq: 0,
            newest_applied: None,
            discard_stale,
        }
    }

    /// Register an outgoing fetch. Returns its sequence number.
    ///
    /// The first fetch issued after an exhaustion becomes the refresh that
    /// settles it.
    pub fn begin_fetch(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight += 1;
        if self.awaiting_refresh && self.refresh_seq.is_none() {
            self.refresh_seq = Some(seq);
            self.refresh_count += 1;
        }
        seq
    }

    /// Surface an error for a fetch that was never sent.
    pub fn reject_fetch(&mut self, error: FetchError) {
        self.error = Some(error.user_message());
    }

    /// Apply the result of the fetch numbered `seq`.
    pub fn finish_fetch(
        &mut self,
        seq: u64,
        result: FetchResult<Vec<LockedTransaction>>,
    ) -> FetchApplied {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.discard_stale && self.newest_applied.is_some_and(|newest| seq < newest) {
            tracing::debug!(seq, "Discarding stale lock registry response");
            return FetchApplied::Stale;
        }

        // Only the refresh itself, or newer data, ends the wait
        let settles_refresh = match self.refresh_seq {
            Some(refresh) => seq == refresh || (seq > refresh && result.is_ok()),
            None => result.is_ok(),
        };
        if settles_refresh {
            self.awaiting_refresh = false;
            self.refresh_seq = None;
        }

        match result {
            Ok(transactions) => {
                self.timers = TimerState::from_registry(&transactions);
                self.transactions = transactions;
                self.error = None;
                self.newest_applied = Some(self.newest_applied.map_or(seq, |n| n.max(seq)));
                FetchApplied::Replaced
            }
            Err(e) => {
                tracing::warn!(error = %e, "Lock registry fetch failed");
                self.error = Some(e.user_message());
                FetchApplied::Failed
            }
        }
    }

    /// Advance all countdowns by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.timers.is_empty() || self.awaiting_refresh {
            return TickOutcome::Idle;
        }
        self.timers.tick();
        if self.timers.has_active() {
            return TickOutcome::Counting;
        }
        self.awaiting_refresh = true;
        TickOutcome::Exhausted
    }

    /// Whether the periodic tick should be running
    pub fn should_tick(&self) -> bool {
        !self.timers.is_empty() && !self.awaiting_refresh
    }

    pub fn remaining(&self, hash: &TxHash) -> Option<u64> {
        self.timers.get(hash)
    }

    pub fn tracked_count(&self) -> usize {
        self.timers.len()
    }

    pub fn transactions(&self) -> &[LockedTransaction] {
        &self.transactions
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of refresh fetches issued because every countdown ran out
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    /// Presentation snapshot
    pub fn board(&self) -> LockBoard {
        let loading = self.in_flight > 0;
        let phase = if !self.transactions.is_empty() {
            BoardPhase::Populated
        } else if loading {
            BoardPhase::Loading
        } else {
            BoardPhase::Empty
        };

        LockBoard {
            phase,
            loading,
            error: self.error.clone(),
            entries: self
                .transactions
                .iter()
                .map(|tx| LockEntryView::build(tx, self.timers.get(&tx.tx_hash)))
                .collect(),
            refresh_count: self.refresh_count,
        }
    }
}

impl Default for LockTracker {
    fn default() -> Self {
        Self::new(false)
    }
}
