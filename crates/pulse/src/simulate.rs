//! Synthetic workload driver
//!
//! Exercises the full inbound surface with randomized traffic so the
//! pipeline can be observed end to end against a real backend without
//! standing up the rest of the service.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

use pulse_metrics::{Method, OrderEvent};
use pulse_telemetry::{LogLevel, TelemetryHandle};

const USERS: [&str; 5] = ["alice", "bob", "carol", "dave", "erin"];

/// Generate events until cancellation
pub async fn run(telemetry: TelemetryHandle, event_period_ms: u64, cancel: CancellationToken) {
    let mut ticker = interval(Duration::from_millis(event_period_ms.max(1)));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => drive_once(&telemetry),
        }
    }
}

fn drive_once(telemetry: &TelemetryHandle) {
    let mut rng = rand::thread_rng();

    let method = match rng.gen_range(0..4) {
        0 => Method::Get,
        1 => Method::Post,
        2 => Method::Put,
        _ => Method::Delete,
    };
    telemetry.on_request_start(method);

    let status = if rng.gen_bool(0.92) { 200 } else { 500 };
    let elapsed_ms = rng.gen_range(2..150);
    telemetry.on_request_complete(status, elapsed_ms);

    if rng.gen_bool(0.3) {
        let user = USERS[rng.gen_range(0..USERS.len())];
        let success = rng.gen_bool(0.8);
        telemetry.on_auth_event(user, success);
        if success {
            telemetry.on_log_event(
                LogLevel::Info,
                "auth",
                &serde_json::json!({ "user": user, "password": "hunter2" }),
            );
        }
    }

    if rng.gen_bool(0.5) {
        telemetry.touch_session(USERS[rng.gen_range(0..USERS.len())]);
    }

    if rng.gen_bool(0.2) {
        let count = rng.gen_range(1..4u64);
        let end = now_millis();
        telemetry.on_order_event(&OrderEvent {
            count,
            revenue: count as f64 * 12.0,
            failed: rng.gen_bool(0.1),
            start_ms: Some(end.saturating_sub(rng.gen_range(10..400))),
            end_ms: Some(end),
        });
    }

    if rng.gen_bool(0.05) {
        telemetry.on_logout(USERS[rng.gen_range(0..USERS.len())]);
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
