//! HTTP request metrics
//!
//! Per-method request counters plus cumulative request latency. The total
//! request count is derived as the sum across methods at snapshot time, not
//! stored separately, so the two can never drift apart.

use serde::Serialize;

use crate::Counter;

/// HTTP request method, bucketed for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    /// Anything else (PATCH, HEAD, OPTIONS, ...)
    Other,
}

impl Method {
    /// Parse a method name (case-insensitive)
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("GET") {
            Self::Get
        } else if s.eq_ignore_ascii_case("POST") {
            Self::Post
        } else if s.eq_ignore_ascii_case("PUT") {
            Self::Put
        } else if s.eq_ignore_ascii_case("DELETE") {
            Self::Delete
        } else {
            Self::Other
        }
    }

    /// Lowercase name used in exported metric names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Other => "other",
        }
    }
}

/// HTTP request metrics
///
/// All fields use atomics for lock-free updates from concurrent handlers.
#[derive(Debug, Default)]
pub struct HttpMetrics {
    get: Counter,
    post: Counter,
    put: Counter,
    delete: Counter,
    other: Counter,
    /// Cumulative request latency in milliseconds; callers derive rates
    latency_ms: Counter,
}

impl HttpMetrics {
    /// Create new metrics with all counters at zero
    pub const fn new() -> Self {
        Self {
            get: Counter::new(),
            post: Counter::new(),
            put: Counter::new(),
            delete: Counter::new(),
            other: Counter::new(),
            latency_ms: Counter::new(),
        }
    }

    /// Record one request for the given method
    #[inline]
    pub fn record(&self, method: Method) {
        match method {
            Method::Get => self.get.inc(),
            Method::Post => self.post.inc(),
            Method::Put => self.put.inc(),
            Method::Delete => self.delete.inc(),
            Method::Other => self.other.inc(),
        }
    }

    /// Add elapsed request time to the cumulative latency counter
    #[inline]
    pub fn record_latency(&self, elapsed_ms: u64) {
        self.latency_ms.add(elapsed_ms);
    }

    /// Take a snapshot of current values
    #[inline]
    pub fn snapshot(&self) -> HttpSnapshot {
        HttpSnapshot {
            get: self.get.get(),
            post: self.post.get(),
            put: self.put.get(),
            delete: self.delete.get(),
            other: self.other.get(),
            latency_ms: self.latency_ms.get(),
        }
    }
}

/// Point-in-time snapshot of HTTP metrics
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct HttpSnapshot {
    pub get: u64,
    pub post: u64,
    pub put: u64,
    pub delete: u64,
    pub other: u64,
    pub latency_ms: u64,
}

impl HttpSnapshot {
    /// Total requests, derived as the sum across methods
    #[inline]
    pub fn total(&self) -> u64 {
        self.get + self.post + self.put + self.delete + self.other
    }

    /// Per-method counts paired with their exported names
    pub fn by_method(&self) -> [(Method, u64); 5] {
        [
            (Method::Get, self.get),
            (Method::Post, self.post),
            (Method::Put, self.put),
            (Method::Delete, self.delete),
            (Method::Other, self.other),
        ]
    }
}
