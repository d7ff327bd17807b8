//! Order (purchase) metrics
//!
//! Additive accumulator updated once per completed order event. Event fields
//! are taken as given; the caller owns their plausibility.

use serde::Serialize;

use crate::{Counter, FloatCounter};

/// A completed order event, as reported by the order-handling layer
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderEvent {
    /// Items in the order
    pub count: u64,
    /// Order revenue
    pub revenue: f64,
    /// Whether fulfilment failed
    pub failed: bool,
    /// Processing start, milliseconds since epoch
    pub start_ms: Option<u64>,
    /// Processing end, milliseconds since epoch
    pub end_ms: Option<u64>,
}

/// Purchase accumulator
#[derive(Debug, Default)]
pub struct OrderMetrics {
    count: Counter,
    revenue: FloatCounter,
    errors: Counter,
    latency_ms: Counter,
}

impl OrderMetrics {
    /// Create new metrics with all accumulators at zero
    pub const fn new() -> Self {
        Self {
            count: Counter::new(),
            revenue: FloatCounter::new(),
            errors: Counter::new(),
            latency_ms: Counter::new(),
        }
    }

    /// Record one order event.
    ///
    /// Adds `count` and `revenue`; increments the error accumulator by
    /// exactly one iff the event is marked failed; adds `end - start` to the
    /// cumulative latency iff both bounds are present.
    pub fn record(&self, event: &OrderEvent) {
        self.count.add(event.count);
        self.revenue.add(event.revenue);
        if event.failed {
            self.errors.inc();
        }
        if let (Some(start), Some(end)) = (event.start_ms, event.end_ms) {
            self.latency_ms.add(end.saturating_sub(start));
        }
    }

    /// Take a snapshot of current values
    #[inline]
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            count: self.count.get(),
            revenue: self.revenue.get(),
            errors: self.errors.get(),
            latency_ms: self.latency_ms.get(),
        }
    }
}

/// Point-in-time snapshot of order metrics
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct OrderSnapshot {
    pub count: u64,
    pub revenue: f64,
    pub errors: u64,
    pub latency_ms: u64,
}
