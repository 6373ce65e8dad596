use foundation::time::{EpochMillis, MILLIS_PER_DAY, SimulatedTime};

/// Accelerated day/night clock.
///
/// While running, one real interval of `simulated_millis_per_day`
/// milliseconds maps to one simulated calendar day. Sampling is a
/// pure function of elapsed wall-clock time, so the simulated time is
/// monotonic non-decreasing as long as the wall clock is.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    simulated_millis_per_day: f64,
    started_at: Option<EpochMillis>,
}

impl SimulationClock {
    pub fn new(simulated_millis_per_day: f64) -> Self {
        Self {
            simulated_millis_per_day,
            started_at: None,
        }
    }

    /// Starts the clock at `now`. Restarting rebases the simulation.
    pub fn start(&mut self, now: EpochMillis) {
        self.started_at = Some(now);
    }

    /// Stops the clock. Unused in normal operation; exists for
    /// session teardown and deterministic tests.
    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Fractional simulated days elapsed by `now`.
    pub fn simulated_days(&self, now: EpochMillis) -> Option<f64> {
        let start = self.started_at?;
        Some(now.since(start) / self.simulated_millis_per_day)
    }

    /// The simulated instant at `now`, or `None` when stopped.
    pub fn sample(&self, now: EpochMillis) -> Option<SimulatedTime> {
        let start = self.started_at?;
        let days = now.since(start) / self.simulated_millis_per_day;
        Some(SimulatedTime(start.0 as f64 + days * MILLIS_PER_DAY))
    }
}
