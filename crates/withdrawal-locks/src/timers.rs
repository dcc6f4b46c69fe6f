//! Local countdown state for locked transactions

use std::collections::HashMap;

use pool_core::{LockedTransaction, TxHash};

/// Per-transaction remaining lock time, projected locally between fetches.
///
/// Only transactions the server reported as locked get an entry. The values
/// drift from server truth between refreshes and are overwritten wholesale
/// by the next successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    remaining: HashMap<TxHash, u64>,
}

impl TimerState {
    /// Seed timers from a freshly fetched registry.
    pub fn from_registry(transactions: &[LockedTransaction]) -> Self {
        let remaining = transactions
            .iter()
            .filter(|tx| tx.withdrawal.is_locked)
            .map(|tx| (tx.tx_hash.clone(), tx.withdrawal.seconds_remaining))
            .collect();
        Self { remaining }
    }

    pub fn get(&self, hash: &TxHash) -> Option<u64> {
        self.remaining.get(hash).copied()
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Whether any entry still has time left
    pub fn has_active(&self) -> bool {
        self.remaining.values().any(|&secs| secs > 0)
    }

    /// Advance every running countdown by one second.
    ///
    /// Entries already at zero stay there. Returns true if anything moved.
    pub fn tick(&mut self) -> bool {
        let mut moved = false;
        for secs in self.remaining.values_mut() {
            if *secs > 0 {
                *secs -= 1;
                moved = true;
            }
        }
        moved
    }
}
