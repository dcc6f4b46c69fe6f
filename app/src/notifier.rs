//! Lock transition notifications
//!
//! Watches successive lock snapshots and logs when a countdown runs out and
//! when the backend confirms a withdrawal as available.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::watch;
use withdrawal_locks::{Availability, LockBoard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockEvent {
    /// Local countdown reached zero, backend confirmation pending
    Expired,
    /// Backend reports the funds as withdrawable
    Unlocked,
}

impl LockEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Unlocked => "unlocked",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LockNotification {
    pub tx_hash: String,
    pub event: LockEvent,
    pub amount_display: String,
    pub timestamp: u64,
}

/// Transitions between two snapshots worth telling the user about.
///
/// Entries first seen in `next` are not reported.
pub fn transitions(prev: &LockBoard, next: &LockBoard) -> Vec<LockNotification> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    next.entries
        .iter()
        .filter_map(|entry| {
            let before = prev.entry(entry.tx_hash.as_str())?.availability;
            let event = match (before, entry.availability) {
                (Availability::Locked, Availability::AwaitingConfirmation) => LockEvent::Expired,
                (
                    Availability::Locked | Availability::AwaitingConfirmation,
                    Availability::Available,
                ) => LockEvent::Unlocked,
                _ => return None,
            };
            Some(LockNotification {
                tx_hash: entry.tx_hash.to_string(),
                event,
                amount_display: entry.amount_display.clone(),
                timestamp,
            })
        })
        .collect()
}

/// Log transitions until the watcher goes away.
pub async fn run(mut boards: watch::Receiver<LockBoard>) {
    let mut prev = boards.borrow_and_update().clone();

    while boards.changed().await.is_ok() {
        let next = boards.borrow_and_update().clone();

        for n in transitions(&prev, &next) {
            tracing::info!(
                tx_hash = %n.tx_hash,
                amount = %n.amount_display,
                event = n.event.as_str(),
                "Withdrawal lock update"
            );
        }
        if next.error.is_some() && next.error != prev.error {
            tracing::warn!(error = ?next.error, "Lock registry unavailable");
        }
        if next.phase != prev.phase {
            tracing::info!(phase = ?next.phase, locks = next.entries.len(), "Lock panel changed");
        }

        prev = next;
    }

    tracing::debug!("Lock notifier stopped");
}
