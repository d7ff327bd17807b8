//! Process-wide metric aggregation
//!
//! The `Aggregator` is the single mutable state of the pipeline: request
//! middleware updates it synchronously, and the flush scheduler reads it
//! through `snapshot()`. It is an explicit object owned by the hosting
//! service, created at startup and passed to whoever needs it.

use std::time::Duration;

use serde::Serialize;

use crate::auth::{AuthMetrics, AuthSnapshot};
use crate::http::{HttpMetrics, HttpSnapshot, Method};
use crate::orders::{OrderEvent, OrderMetrics, OrderSnapshot};
use crate::sessions::SessionTracker;
use crate::system::SystemSnapshot;

/// Process-wide counters, accumulators, and the active-session set.
///
/// All update operations are callable from arbitrary concurrent request
/// contexts; `snapshot()` may run concurrently with any of them and never
/// observes a partially-applied update.
#[derive(Debug)]
pub struct Aggregator {
    http: HttpMetrics,
    auth: AuthMetrics,
    orders: OrderMetrics,
    sessions: SessionTracker,
}

impl Aggregator {
    /// Create an aggregator with all counters at zero
    pub fn new(idle_threshold: Duration) -> Self {
        Self {
            http: HttpMetrics::new(),
            auth: AuthMetrics::new(),
            orders: OrderMetrics::new(),
            sessions: SessionTracker::new(idle_threshold),
        }
    }

    /// Count one request for the given method
    #[inline]
    pub fn record_request(&self, method: Method) {
        self.http.record(method);
    }

    /// Add elapsed request time to the cumulative latency counter
    #[inline]
    pub fn record_request_latency(&self, elapsed_ms: u64) {
        self.http.record_latency(elapsed_ms);
    }

    /// Record a login attempt; on success, insert or refresh the user's
    /// active session
    pub fn record_auth_event(&self, user_id: &str, success: bool) {
        self.auth.record(success);
        if success {
            self.sessions.record_login(user_id);
        }
    }

    /// Remove the user's active session on logout
    pub fn end_session(&self, user_id: &str) {
        self.sessions.end_session(user_id);
    }

    /// Refresh activity for an already-authenticated user (no-op if the
    /// user has no active session)
    pub fn touch_session(&self, user_id: &str) {
        self.sessions.touch(user_id);
    }

    /// Record one completed order event
    pub fn record_purchase(&self, event: &OrderEvent) {
        self.orders.record(event);
    }

    /// Sweep expired sessions, then copy every counter into an immutable
    /// snapshot.
    ///
    /// The reported active-session count always reflects the just-completed
    /// sweep; no session is counted after its own expiry in the same tick.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let active_sessions = self.sessions.sweep() as u64;

        MetricsSnapshot {
            http: self.http.snapshot(),
            auth: self.auth.snapshot(),
            orders: self.orders.snapshot(),
            active_sessions,
            system: SystemSnapshot::sample(),
        }
    }
}

/// Immutable copy of all metrics at a point in time
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MetricsSnapshot {
    pub http: HttpSnapshot,
    pub auth: AuthSnapshot,
    pub orders: OrderSnapshot,
    pub active_sessions: u64,
    pub system: SystemSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const IDLE: Duration = Duration::from_secs(600);

    #[test]
    fn test_concurrent_request_counts() {
        let aggregator = Arc::new(Aggregator::new(IDLE));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let aggregator = Arc::clone(&aggregator);
                std::thread::spawn(move || {
                    let method = if i % 2 == 0 { Method::Get } else { Method::Post };
                    for _ in 0..1000 {
                        aggregator.record_request(method);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.http.get, 4000);
        assert_eq!(snapshot.http.post, 4000);
        assert_eq!(snapshot.http.total(), 8000);
    }

    #[test]
    fn test_auth_scenario() {
        let aggregator = Aggregator::new(IDLE);
        aggregator.record_auth_event("alice", true);
        aggregator.record_auth_event("bob", true);
        aggregator.record_auth_event("carol", true);
        aggregator.record_auth_event("mallory", false);

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.auth.success, 3);
        assert_eq!(snapshot.auth.failure, 1);
        assert_eq!(snapshot.active_sessions, 3);
    }

    #[test]
    fn test_repeated_login_same_user_counts_once() {
        let aggregator = Aggregator::new(IDLE);
        aggregator.record_auth_event("alice", true);
        aggregator.record_auth_event("alice", true);
        aggregator.record_auth_event("alice", true);

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.auth.success, 3);
        assert_eq!(snapshot.active_sessions, 1);
    }

    #[test]
    fn test_failed_login_creates_no_session() {
        let aggregator = Aggregator::new(IDLE);
        aggregator.record_auth_event("mallory", false);
        assert_eq!(aggregator.snapshot().active_sessions, 0);
    }

    #[test]
    fn test_order_scenario() {
        let aggregator = Aggregator::new(IDLE);
        aggregator.record_purchase(&OrderEvent {
            count: 2,
            revenue: 24.0,
            failed: false,
            start_ms: Some(100),
            end_ms: Some(150),
        });
        aggregator.record_purchase(&OrderEvent {
            count: 1,
            revenue: 12.0,
            failed: true,
            start_ms: None,
            end_ms: None,
        });

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.orders.count, 3);
        assert_eq!(snapshot.orders.revenue, 36.0);
        assert_eq!(snapshot.orders.errors, 1);
        assert_eq!(snapshot.orders.latency_ms, 50);
    }

    #[test]
    fn test_sum_monotonicity_across_snapshots() {
        let aggregator = Aggregator::new(IDLE);
        aggregator.record_request(Method::Get);
        aggregator.record_auth_event("alice", true);

        let first = aggregator.snapshot();

        aggregator.record_request(Method::Get);
        aggregator.record_request_latency(10);
        aggregator.record_purchase(&OrderEvent {
            count: 1,
            revenue: 5.0,
            ..Default::default()
        });

        let second = aggregator.snapshot();

        assert!(second.http.total() >= first.http.total());
        assert!(second.http.latency_ms >= first.http.latency_ms);
        assert!(second.auth.success >= first.auth.success);
        assert!(second.auth.failure >= first.auth.failure);
        assert!(second.orders.count >= first.orders.count);
        assert!(second.orders.revenue >= first.orders.revenue);
        assert!(second.orders.errors >= first.orders.errors);
    }

    #[test]
    fn test_logout_removes_session() {
        let aggregator = Aggregator::new(IDLE);
        aggregator.record_auth_event("alice", true);
        aggregator.record_auth_event("bob", true);
        aggregator.end_session("alice");
        assert_eq!(aggregator.snapshot().active_sessions, 1);
    }

    #[test]
    fn test_snapshot_concurrent_with_updates() {
        let aggregator = Arc::new(Aggregator::new(IDLE));

        let writer = {
            let aggregator = Arc::clone(&aggregator);
            std::thread::spawn(move || {
                for i in 0..2000 {
                    aggregator.record_request(Method::Put);
                    aggregator.record_auth_event(&format!("user{}", i % 7), true);
                }
            })
        };

        // Snapshots taken while updates are in flight must stay coherent
        for _ in 0..50 {
            let snapshot = aggregator.snapshot();
            assert!(snapshot.http.put <= 2000);
            assert!(snapshot.active_sessions <= 7);
        }

        writer.join().unwrap();
        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.http.put, 2000);
        assert_eq!(snapshot.active_sessions, 7);
    }
}
