//! Pulse - Metrics
//!
//! In-process metric aggregation for concurrent request handlers.
//!
//! # Overview
//!
//! This crate provides:
//! - Atomic counters and accumulators updated synchronously on the request path
//! - An active-session tracker with idle expiry
//! - A consistent `snapshot()` that the flush scheduler renders and exports
//!
//! # Design Principles
//!
//! - **Lock-free counters**: all scalar metrics use atomic operations
//! - **Low overhead**: no allocations during metric updates
//! - **Torn-read free**: snapshots copy each value once; the session map is
//!   swept and counted under a single lock acquisition
//! - **No I/O under exclusion**: snapshots are copied out before any export
//!
//! # Usage
//!
//! ```
//! use pulse_metrics::{Aggregator, Method, OrderEvent};
//! use std::time::Duration;
//!
//! let aggregator = Aggregator::new(Duration::from_secs(600));
//! aggregator.record_request(Method::Get);
//! aggregator.record_auth_event("alice", true);
//! aggregator.record_purchase(&OrderEvent {
//!     count: 2,
//!     revenue: 24.0,
//!     failed: false,
//!     start_ms: Some(100),
//!     end_ms: Some(150),
//! });
//!
//! let snapshot = aggregator.snapshot();
//! assert_eq!(snapshot.http.total(), 1);
//! assert_eq!(snapshot.active_sessions, 1);
//! ```

mod aggregator;
mod auth;
mod http;
mod orders;
mod sessions;
mod system;

pub use aggregator::{Aggregator, MetricsSnapshot};
pub use auth::{AuthMetrics, AuthSnapshot};
pub use http::{HttpMetrics, HttpSnapshot, Method};
pub use orders::{OrderEvent, OrderMetrics, OrderSnapshot};
pub use sessions::{ActiveSession, SessionTracker};
pub use system::SystemSnapshot;

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter wrapper for convenient metric operations.
///
/// Monotonically non-decreasing within a process lifetime; reset only at
/// process start.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    /// Create a new counter initialized to 0
    #[inline]
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Increment the counter by `val` (relaxed ordering for performance)
    #[inline]
    pub fn add(&self, val: u64) {
        self.0.fetch_add(val, Ordering::Relaxed);
    }

    /// Increment the counter by 1
    #[inline]
    pub fn inc(&self) {
        self.add(1);
    }

    /// Get the current value (relaxed ordering)
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Atomic f64 accumulator using bit casting to `AtomicU64`.
///
/// Used for the running revenue total, which is fractional.
#[derive(Debug, Default)]
pub struct FloatCounter(AtomicU64);

impl FloatCounter {
    /// Create a new accumulator initialized to 0.0
    #[inline]
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Add a value atomically (CAS loop)
    pub fn add(&self, val: f64) {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let new = f64::from_bits(current) + val;
            match self.0.compare_exchange_weak(
                current,
                new.to_bits(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }

    /// Get the current value
    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}
