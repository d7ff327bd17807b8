//! Pipeline wiring and the middleware-facing surface
//!
//! `Telemetry::start` is the single entry point for a hosting service: it
//! validates configuration (the only fatal error in the pipeline), spawns
//! the flush scheduler, and returns a cheap handle that request middleware
//! calls synchronously. No failure behind the handle ever propagates back
//! to, or alters the outcome of, the request that triggered it.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use pulse_config::Config;
use pulse_metrics::{Aggregator, Method, MetricsSnapshot, OrderEvent};

use crate::exporter::{Endpoint, Exporter};
use crate::redact::Sanitizer;
use crate::scheduler::Scheduler;
use crate::shipper::{LogLevel, LogShipper};

/// Pipeline constructor
pub struct Telemetry;

impl Telemetry {
    /// Validate `config`, spawn the flush scheduler under `cancel`, and
    /// return the handle the hosting service passes to its middleware.
    ///
    /// Must be called from within a tokio runtime. Cancelling the token
    /// stops the recurring timer; in-flight pushes are left to finish on
    /// their own and no drain-on-exit is attempted.
    pub fn start(config: &Config, cancel: CancellationToken) -> pulse_config::Result<TelemetryHandle> {
        config.validate()?;

        let aggregator = Arc::new(Aggregator::new(config.sessions.idle_threshold));

        let metrics_exporter = Exporter::over_http(
            Endpoint {
                url: config.metrics.url.clone(),
                api_key: config.metrics.api_key.clone(),
                content_type: config.metrics.format.content_type(),
            },
            config.metrics.timeout,
            "metrics",
        );
        let scheduler = Scheduler::new(
            Arc::clone(&aggregator),
            metrics_exporter,
            config.metrics.clone(),
        );
        tokio::spawn(scheduler.run(cancel));

        let logs_exporter = Exporter::over_http(
            Endpoint {
                url: config.logs.url.clone(),
                api_key: config.logs.api_key.clone(),
                content_type: "application/json",
            },
            config.logs.timeout,
            "logs",
        );
        let shipper = LogShipper::new(
            logs_exporter,
            Sanitizer::new(&config.redact.fields),
            &config.logs.source,
        );

        Ok(TelemetryHandle::new(aggregator, shipper))
    }
}

/// Cheap-to-clone handle exposing the inbound middleware surface.
#[derive(Clone)]
pub struct TelemetryHandle {
    aggregator: Arc<Aggregator>,
    shipper: Arc<LogShipper>,
}

impl std::fmt::Debug for TelemetryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryHandle").finish_non_exhaustive()
    }
}

impl TelemetryHandle {
    /// Assemble a handle from custom parts (used by hosts that bring their
    /// own transport, and by tests)
    pub fn new(aggregator: Arc<Aggregator>, shipper: LogShipper) -> Self {
        Self {
            aggregator,
            shipper: Arc::new(shipper),
        }
    }

    /// A request entered the service
    pub fn on_request_start(&self, method: Method) {
        self.aggregator.record_request(method);
    }

    /// A request completed: accumulate latency and ship the access record
    /// at a status-derived severity
    pub fn on_request_complete(&self, status_code: u16, elapsed_ms: u64) {
        self.aggregator.record_request_latency(elapsed_ms);
        self.shipper.log(
            LogLevel::from_status(status_code),
            "http",
            &json!({ "statusCode": status_code, "elapsedMillis": elapsed_ms }),
        );
    }

    /// A login attempt finished; a success creates or refreshes the user's
    /// active session
    pub fn on_auth_event(&self, user_id: &str, success: bool) {
        self.aggregator.record_auth_event(user_id, success);
    }

    /// The user logged out
    pub fn on_logout(&self, user_id: &str) {
        self.aggregator.end_session(user_id);
    }

    /// An authenticated user showed activity (no-op for unknown users)
    pub fn touch_session(&self, user_id: &str) {
        self.aggregator.touch_session(user_id);
    }

    /// An order completed
    pub fn on_order_event(&self, event: &OrderEvent) {
        self.aggregator.record_purchase(event);
    }

    /// Ship an arbitrary structured record through the sanitized log
    /// pathway
    pub fn on_log_event<T: Serialize>(&self, level: LogLevel, kind: &str, data: &T) {
        self.shipper.log(level, kind, data);
    }

    /// Current metrics, post-sweep; mainly for introspection endpoints and
    /// tests
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.aggregator.snapshot()
    }
}
