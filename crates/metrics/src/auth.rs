//! Authentication attempt metrics

use serde::Serialize;

use crate::Counter;

/// Login/logout attempt accumulator
#[derive(Debug, Default)]
pub struct AuthMetrics {
    success: Counter,
    failure: Counter,
}

impl AuthMetrics {
    /// Create new metrics with all counters at zero
    pub const fn new() -> Self {
        Self {
            success: Counter::new(),
            failure: Counter::new(),
        }
    }

    /// Record one auth attempt
    #[inline]
    pub fn record(&self, success: bool) {
        if success {
            self.success.inc();
        } else {
            self.failure.inc();
        }
    }

    /// Take a snapshot of current values
    #[inline]
    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            success: self.success.get(),
            failure: self.failure.get(),
        }
    }
}

/// Point-in-time snapshot of auth metrics
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AuthSnapshot {
    pub success: u64,
    pub failure: u64,
}
