//! Host time sources: a monotonic millisecond counter for the scheduler and
//! the zone-aware local time for the countdown.

use chrono::{DateTime, Local};

// Browsers have no std monotonic clock; `web-time` reads `performance.now()`.
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Monotonic milliseconds since the host started, plus local wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct HostClock {
    started: Instant,
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis().min(u64::MAX as u128) as u64
    }

    pub fn local_now(&self) -> DateTime<Local> {
        Local::now()
    }
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}
