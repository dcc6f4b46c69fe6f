//! Core type definitions for pool-watch

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction hash as reported by the staking backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a pool transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Stake,
    Unstake,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stake => "stake",
            Self::Unstake => "unstake",
        }
    }

    /// Human label used on lock cards
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stake => "Staked",
            Self::Unstake => "Unstaked",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Server-side withdrawal lock status of a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalLock {
    pub is_locked: bool,
    /// Authoritative remaining lock time at fetch time
    pub seconds_remaining: u64,
    #[serde(default)]
    pub available_at: Option<String>,
    pub is_available: bool,
}

/// A transaction subject to a withdrawal lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockedTransaction {
    pub tx_hash: TxHash,
    #[serde(rename = "type")]
    pub kind: TxKind,
    /// Amount in TON
    pub amount: f64,
    /// Backend status string, not interpreted here
    pub status: String,
    /// Total lock period in seconds, fixed at creation
    pub lock_duration: u64,
    pub withdrawal: WithdrawalLock,
    pub created_at: String,
}

/// Body of `GET /api/withdrawal/locked-transactions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockedTransactionsResponse {
    #[serde(default)]
    pub locked_transactions: Vec<LockedTransaction>,
}

/// Constants
pub mod constants {
    /// Lock registry endpoint path on the staking backend
    pub const LOCKED_TRANSACTIONS_PATH: &str = "/api/withdrawal/locked-transactions";

    /// Block explorer transaction link prefix
    pub const TONSCAN_TX_URL: &str = "https://tonscan.org/tx/";

    /// Banner text when the backend supplies no error message
    pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch locked transactions";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_transaction_from_backend_json() {
        let json = r#"{
            "tx_hash": "abc",
            "type": "unstake",
            "amount": 12.5,
            "status": "confirmed",
            "lock_duration": 120,
            "withdrawal": {
                "is_locked": true,
                "seconds_remaining": 120,
                "available_at": "2025-01-02T03:04:05",
                "is_available": false
            },
            "created_at": "2025-01-02T03:02:05"
        }"#;
        let tx: LockedTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.tx_hash.as_str(), "abc");
        assert_eq!(tx.kind, TxKind::Unstake);
        assert_eq!(tx.lock_duration, 120);
        assert!(tx.withdrawal.is_locked);
        assert_eq!(
            tx.withdrawal.available_at.as_deref(),
            Some("2025-01-02T03:04:05")
        );
    }

    #[test]
    fn test_missing_available_at_is_none() {
        let json = r#"{"is_locked": false, "seconds_remaining": 0, "is_available": true}"#;
        let lock: WithdrawalLock = serde_json::from_str(json).unwrap();
        assert!(lock.available_at.is_none());
        assert!(lock.is_available);
    }

    #[test]
    fn test_response_without_field_is_empty() {
        let resp: LockedTransactionsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.locked_transactions.is_empty());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(TxKind::Stake.label(), "Staked");
        assert_eq!(TxKind::Unstake.as_str(), "unstake");
    }
}
