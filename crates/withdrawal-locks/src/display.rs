//! Display helpers for lock cards

use chrono::{DateTime, NaiveDateTime};
use pool_core::constants::TONSCAN_TX_URL;
use serde::{Deserialize, Serialize};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_DAY: u64 = 86_400;

/// Render a countdown, showing only the most significant units.
///
/// `86400 -> "1d 0h"`, `3600 -> "1h 0m 0s"`, `60 -> "1m 0s"`, `0 -> "0s"`.
pub fn format_duration(seconds: u64) -> String {
    let days = seconds / SECS_PER_DAY;
    let hours = (seconds % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let secs = seconds % SECS_PER_MINUTE;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Fraction of the lock period already elapsed, in `[0, 1]`.
///
/// A zero-length lock counts as fully elapsed.
pub fn progress(lock_duration: u64, remaining: u64) -> f64 {
    if lock_duration == 0 {
        return 1.0;
    }
    let elapsed = lock_duration.saturating_sub(remaining);
    (elapsed as f64 / lock_duration as f64).clamp(0.0, 1.0)
}

/// Withdrawal availability as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Lock still running
    Locked,
    /// Local countdown hit zero; waiting for the backend to confirm
    AwaitingConfirmation,
    /// Backend reports the funds as withdrawable
    Available,
}

impl Availability {
    /// Resolve from the local countdown (if tracked) and the server flag.
    ///
    /// A tracked entry is never marked available client-side: only a refresh
    /// that drops it from tracking can do that.
    pub fn resolve(local_remaining: Option<u64>, server_available: bool) -> Self {
        match local_remaining {
            Some(0) => Self::AwaitingConfirmation,
            Some(_) => Self::Locked,
            None if server_available => Self::Available,
            None => Self::Locked,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Explorer link for a transaction
pub fn explorer_url(tx_hash: &str) -> String {
    format!("{}{}", TONSCAN_TX_URL, tx_hash)
}

/// `first12...last8` form of a hash; short hashes are returned whole.
pub fn short_hash(tx_hash: &str) -> String {
    let chars: Vec<char> = tx_hash.chars().collect();
    if chars.len() <= 20 {
        return tx_hash.to_string();
    }
    let head: String = chars[..12].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn format_amount(amount: f64) -> String {
    format!("{:.2} TON", amount)
}

/// `dd.mm.yyyy, HH:MM`, or the raw string if it is not a recognizable timestamp.
pub fn format_timestamp(raw: &str) -> String {
    const OUT: &str = "%d.%m.%Y, %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(OUT).to_string();
    }
    // Backend emits naive ISO-8601 without an offset
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(OUT).to_string();
    }
    raw.to_string()
}
