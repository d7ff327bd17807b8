//! System gauge sampling
//!
//! CPU and memory utilization sampled at snapshot time. Detection is
//! platform-specific and best-effort: unsupported platforms report zero
//! rather than failing the snapshot.

use serde::Serialize;

/// Instantaneous system utilization
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SystemSnapshot {
    /// One-minute load average normalized by core count, as a percentage
    pub cpu_percent: f64,
    /// Used physical memory as a percentage of total
    pub memory_percent: f64,
}

impl SystemSnapshot {
    /// Sample current utilization
    pub fn sample() -> Self {
        Self {
            cpu_percent: cpu_percent(),
            memory_percent: memory_percent(),
        }
    }
}

#[cfg(target_os = "linux")]
fn cpu_percent() -> f64 {
    let cores = std::thread::available_parallelism()
        .map(|p| p.get() as f64)
        .unwrap_or(1.0);

    std::fs::read_to_string("/proc/loadavg")
        .ok()
        .and_then(|content| {
            content
                .split_whitespace()
                .next()
                .and_then(|load| load.parse::<f64>().ok())
        })
        .map(|load| (load / cores * 100.0).min(100.0))
        .unwrap_or(0.0)
}

#[cfg(target_os = "linux")]
fn memory_percent() -> f64 {
    let Ok(content) = std::fs::read_to_string("/proc/meminfo") else {
        return 0.0;
    };

    let field = |name: &str| -> Option<f64> {
        content
            .lines()
            .find(|line| line.starts_with(name))
            .and_then(|line| line.split_whitespace().nth(1))
            .and_then(|kb| kb.parse::<f64>().ok())
    };

    match (field("MemTotal:"), field("MemAvailable:")) {
        (Some(total), Some(available)) if total > 0.0 => {
            (total - available) / total * 100.0
        }
        _ => 0.0,
    }
}

#[cfg(not(target_os = "linux"))]
fn cpu_percent() -> f64 {
    0.0
}

#[cfg(not(target_os = "linux"))]
fn memory_percent() -> f64 {
    0.0
}
