//! Presentation snapshot of the lock registry

use pool_core::{LockedTransaction, TxHash, TxKind};
use serde::{Deserialize, Serialize};

use crate::display::{
    explorer_url, format_amount, format_duration, format_timestamp, progress, short_hash,
    Availability,
};

/// What the lock panel should show overall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardPhase {
    /// First fetch still running, nothing to show yet
    Loading,
    /// Nothing is locked (informational, not an error)
    Empty,
    Populated,
}

/// One lock card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockEntryView {
    pub tx_hash: TxHash,
    pub kind: TxKind,
    pub kind_label: String,
    pub amount: f64,
    pub amount_display: String,
    pub status: String,
    pub lock_duration: u64,
    pub remaining_seconds: u64,
    pub availability: Availability,
    pub available: bool,
    /// Elapsed fraction of the lock, `[0, 1]`
    pub progress: f64,
    pub countdown: String,
    pub available_at: Option<String>,
    pub available_at_display: Option<String>,
    pub created_at: String,
    pub explorer_url: String,
    pub short_hash: String,
    /// Whether a local countdown is running for this entry
    pub tracked: bool,
}

impl LockEntryView {
    /// Build a card from server data and the local countdown, if any.
    ///
    /// The local value takes precedence over the server's `seconds_remaining`
    /// once tracking has started.
    pub fn build(tx: &LockedTransaction, local_remaining: Option<u64>) -> Self {
        let remaining = local_remaining.unwrap_or(tx.withdrawal.seconds_remaining);
        let availability = Availability::resolve(local_remaining, tx.withdrawal.is_available);
        let progress = match availability {
            Availability::Available => 1.0,
            _ => progress(tx.lock_duration, remaining),
        };

        Self {
            tx_hash: tx.tx_hash.clone(),
            kind: tx.kind,
            kind_label: tx.kind.label().to_string(),
            amount: tx.amount,
            amount_display: format_amount(tx.amount),
            status: tx.status.clone(),
            lock_duration: tx.lock_duration,
            remaining_seconds: remaining,
            availability,
            available: availability.is_available(),
            progress,
            countdown: format_duration(remaining),
            available_at: tx.withdrawal.available_at.clone(),
            available_at_display: tx.withdrawal.available_at.as_deref().map(format_timestamp),
            created_at: tx.created_at.clone(),
            explorer_url: explorer_url(tx.tx_hash.as_str()),
            short_hash: short_hash(tx.tx_hash.as_str()),
            tracked: local_remaining.is_some(),
        }
    }
}

/// Full lock panel state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockBoard {
    pub phase: BoardPhase,
    /// A fetch is in flight
    pub loading: bool,
    /// Banner text of the most recent failed fetch
    pub error: Option<String>,
    pub entries: Vec<LockEntryView>,
    /// Refreshes triggered by countdown exhaustion
    pub refresh_count: u64,
}

impl LockBoard {
    pub fn entry(&self, hash: &str) -> Option<&LockEntryView> {
        self.entries.iter().find(|e| e.tx_hash.as_str() == hash)
    }
}

impl Default for LockBoard {
    fn default() -> Self {
        Self {
            phase: BoardPhase::Empty,
            loading: false,
            error: None,
            entries: Vec::new(),
            refresh_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{available_tx, locked_tx};

    #[test]
    fn test_tracked_value_overrides_server_value() {
        let tx = locked_tx("abc", 120, 120);
        let view = LockEntryView::build(&tx, Some(30));
        assert_eq!(view.remaining_seconds, 30);
        assert_eq!(view.countdown, "30s");
        assert_eq!(view.progress, 0.75);
        assert_eq!(view.availability, Availability::Locked);
        assert!(view.tracked);
    }

    #[test]
    fn test_untracked_falls_back_to_server_value() {
        let tx = locked_tx("abc", 120, 90);
        let view = LockEntryView::build(&tx, None);
        assert_eq!(view.remaining_seconds, 90);
        assert!(!view.tracked);
        assert!(!view.available);
    }

    #[test]
    fn test_available_entry_is_complete() {
        let view = LockEntryView::build(&available_tx("done", 600), None);
        assert!(view.available);
        assert_eq!(view.progress, 1.0);
        assert_eq!(view.explorer_url, "https://tonscan.org/tx/done");
        assert_eq!(view.kind_label, "Staked");
    }

    #[test]
    fn test_board_serializes_snake_case() {
        let board = LockBoard::default();
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["phase"], "empty");
        assert_eq!(json["refresh_count"], 0);
    }
}
