//! Periodic flush scheduling
//!
//! A recurring timer that snapshots the aggregator (which sweeps expired
//! sessions), renders the snapshot into the configured wire format, and
//! hands the payload to the exporter. The tick cadence is never affected by
//! backend latency: at most one export is in flight at a time, and a tick
//! that fires while the previous export is still pending is dropped, not
//! queued.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use pulse_config::{MetricsExportConfig, WireFormat};
use pulse_metrics::{Aggregator, MetricsSnapshot};
use pulse_protocol::MetricBuilder;

use crate::error::TelemetryError;
use crate::exporter::Exporter;

/// Recurring flush loop over one metric stream.
pub struct Scheduler {
    aggregator: Arc<Aggregator>,
    exporter: Exporter,
    config: MetricsExportConfig,
    /// One permit: holds the at-most-one-in-flight export invariant
    in_flight: Arc<Semaphore>,
}

impl Scheduler {
    /// Create a scheduler flushing `aggregator` through `exporter`
    pub fn new(aggregator: Arc<Aggregator>, exporter: Exporter, config: MetricsExportConfig) -> Self {
        Self {
            aggregator,
            exporter,
            config,
            in_flight: Arc::new(Semaphore::new(1)),
        }
    }

    /// Run the flush loop until cancellation.
    ///
    /// Spawn this as a task. Cancellation stops the timer; an in-flight
    /// export is neither awaited nor cancelled.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            interval_secs = self.config.interval.as_secs(),
            format = ?self.config.format,
            "metrics flush scheduler started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("metrics flush scheduler shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.flush();
                }
            }
        }
    }

    /// Snapshot, render, and hand off one flush.
    ///
    /// Every failure mode is terminal for this tick only: the loop always
    /// reaches the next tick.
    fn flush(&self) {
        let permit = match Arc::clone(&self.in_flight).try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                debug!("previous export still in flight, dropping tick");
                return;
            }
        };

        // Sweep + copy happen here, before any I/O
        let snapshot = self.aggregator.snapshot();

        let body = match self.render(&snapshot) {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "failed to render metrics payload, skipping flush");
                return;
            }
        };

        let exporter = self.exporter.clone();
        tokio::spawn(async move {
            let _permit = permit;
            let _ = exporter.push(body).await;
        });
    }

    /// Render a snapshot into the configured wire format.
    ///
    /// A snapshot with no activity still renders: every counter is a
    /// cumulative total and the backend expects the full series each flush.
    fn render(&self, snapshot: &MetricsSnapshot) -> Result<String, TelemetryError> {
        let builder = MetricBuilder::new(&self.config.source)
            .sum("http_requests_total", snapshot.http.total(), "1");

        let builder = snapshot
            .http
            .by_method()
            .iter()
            .fold(builder, |builder, (method, count)| {
                builder.sum(&format!("http_requests_{}", method.as_str()), *count, "1")
            });

        let builder = builder
            .sum("request_latency_ms", snapshot.http.latency_ms, "ms")
            .sum("auth_success", snapshot.auth.success, "1")
            .sum("auth_failure", snapshot.auth.failure, "1")
            .gauge("active_users", snapshot.active_sessions, "1")
            .sum("orders_placed", snapshot.orders.count, "1")
            .sum("order_failures", snapshot.orders.errors, "1")
            .sum("revenue", snapshot.orders.revenue, "$")
            .sum("order_latency_ms", snapshot.orders.latency_ms, "ms")
            .gauge("cpu_percent", snapshot.system.cpu_percent, "%")
            .gauge("memory_percent", snapshot.system.memory_percent, "%");

        match self.config.format {
            WireFormat::Otlp => Ok(builder.render_json()?),
            WireFormat::Line => Ok(builder.render_line("\n")),
        }
    }
}
