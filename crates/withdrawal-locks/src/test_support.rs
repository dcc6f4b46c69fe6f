//! Fixtures shared by the unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use pool_client::{FetchResult, LockRegistry};
use pool_core::{LockedTransaction, TxHash, TxKind, WithdrawalLock};
use tokio::sync::oneshot;

pub fn locked_tx(hash: &str, lock_duration: u64, seconds_remaining: u64) -> LockedTransaction {
    LockedTransaction {
        tx_hash: TxHash::new(hash),
        kind: TxKind::Unstake,
        amount: 25.0,
        status: "confirmed".to_string(),
        lock_duration,
        withdrawal: WithdrawalLock {
            is_locked: true,
            seconds_remaining,
            available_at: Some("2025-03-01T12:00:00".to_string()),
            is_available: false,
        },
        created_at: "2025-03-01T10:00:00".to_string(),
    }
}

pub fn available_tx(hash: &str, lock_duration: u64) -> LockedTransaction {
    LockedTransaction {
        tx_hash: TxHash::new(hash),
        kind: TxKind::Stake,
        amount: 10.0,
        status: "confirmed".to_string(),
        lock_duration,
        withdrawal: WithdrawalLock {
            is_locked: false,
            seconds_remaining: 0,
            available_at: None,
            is_available: true,
        },
        created_at: "2025-03-01T10:00:00".to_string(),
    }
}

type Reply = FetchResult<Vec<LockedTransaction>>;

enum Step {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
    Hang,
}

/// Registry that answers from a script and counts calls.
///
/// Per-token gates take precedence over the FIFO script. Calls past the end
/// of the script never resolve.
#[derive(Default)]
pub struct ScriptedRegistry {
    steps: Mutex<VecDeque<Step>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    calls: AtomicUsize,
}

impl ScriptedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(self, reply: Reply) -> Self {
        self.push(Step::Ready(reply));
        self
    }

    pub fn hang(self) -> Self {
        self.push(Step::Hang);
        self
    }

    /// Queue a reply released through the returned sender.
    pub fn gated(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(Step::Gated(rx));
        tx
    }

    /// Hold the next fetch made with `token` until the sender fires.
    pub fn gated_for(&self, token: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(token.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, step: Step) {
        self.steps.lock().unwrap().push_back(step);
    }
}

#[async_trait]
impl LockRegistry for ScriptedRegistry {
    async fn fetch_locked(&self, token: Option<&str>) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = token.and_then(|t| self.gates.lock().unwrap().remove(t));
        let step = match gate {
            Some(rx) => Step::Gated(rx),
            None => self.steps.lock().unwrap().pop_front().unwrap_or(Step::Hang),
        };
        match step {
            Step::Ready(reply) => reply,
            Step::Gated(rx) => match rx.await {
                Ok(reply) => reply,
                Err(_) => std::future::pending().await,
            },
            Step::Hang => std::future::pending().await,
        }
    }
}
