//! Withdrawal lock countdowns
//!
//! Tracks the authenticated user's locked pool transactions: a local
//! one-second countdown per lock, seeded from the backend and reconciled by
//! re-fetching once every countdown has run out.

pub mod display;
pub mod timers;
pub mod tracker;
pub mod view;
pub mod watcher;

#[cfg(test)]
mod test_support;

pub use display::{format_duration, progress, Availability};
pub use timers::TimerState;
pub use tracker::{FetchApplied, LockTracker, TickOutcome};
pub use view::{BoardPhase, LockBoard, LockEntryView};
pub use watcher::{LockWatcher, WatcherError, WatcherHandle};
