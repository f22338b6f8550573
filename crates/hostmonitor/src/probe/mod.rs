//! Reachability probing.
//!
//! A [`Prober`] performs exactly one connection attempt. Retrying is layered
//! on top by [`probe_with_retry`] so every prober gets the same bounded,
//! sequential retry behavior.

mod http;

pub use http::HttpProber;

use std::time::Duration;

use tracing::debug;

use crate::model::Host;

/// Single-attempt reachability check
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// Attempt one connection to `host`, bounded by `timeout`.
    ///
    /// Every failure, including an invalid address or a timeout, is reported
    /// as `false`.
    async fn probe(&self, host: &Host, timeout: Duration) -> bool;
}

/// Probe `host` up to `max_attempts` times, stopping at the first success.
///
/// Attempts run one after the other without any delay in between, the retry
/// only exists to absorb a single transient failure. A `max_attempts` of 0 is
/// treated as 1.
pub async fn probe_with_retry(
    prober: &dyn Prober,
    host: &Host,
    timeout: Duration,
    max_attempts: u32,
) -> bool {
    let max_attempts = max_attempts.max(1);

    for attempt in 1..=max_attempts {
        if prober.probe(host, timeout).await {
            return true;
        }
        debug!(host = %host, attempt, max_attempts, "Probe attempt failed");
    }

    false
}
