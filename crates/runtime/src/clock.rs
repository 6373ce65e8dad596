use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

use foundation::time::EpochMillis;

/// Source of wall-clock time for the frame loop.
///
/// Injectable so frame-driven logic can be tested deterministically
/// instead of depending on a platform frame callback.
pub trait Clock {
    fn now(&self) -> EpochMillis;
}

/// System wall clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> EpochMillis {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        EpochMillis(elapsed.as_millis() as u64)
    }
}

/// Manually advanced clock for deterministic tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> EpochMillis {
        EpochMillis(self.now_ms.get())
    }
}
