//! Time utilities for the frame loop

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp in milliseconds
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Wall-clock length of one frame at `tick_rate` frames per second, never
/// shorter than a microsecond
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_micros((1_000_000 / u64::from(tick_rate.max(1))).max(1))
}

/// Simulation delta for one frame (in seconds)
pub fn tick_delta(tick_rate: u32) -> f32 {
    1.0 / tick_rate.max(1) as f32
}

/// Frames between two snapshots; at least one
pub fn snapshot_interval(tick_rate: u32, snapshot_rate: u32) -> u32 {
    (tick_rate / snapshot_rate.max(1)).max(1)
}

/// A simple timer for measuring durations
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
