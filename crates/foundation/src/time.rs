/// Time primitives

/// Milliseconds in one calendar day: 24 h * 3600 s * 1000 ms.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Wall-clock instant, milliseconds since the Unix epoch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpochMillis(pub u64);

impl EpochMillis {
    /// Elapsed milliseconds since `earlier`, saturating at zero.
    pub fn since(self, earlier: EpochMillis) -> f64 {
        self.0.saturating_sub(earlier.0) as f64
    }
}

/// Simulated instant, fractional milliseconds since the Unix epoch.
///
/// Fractional because accelerated simulation steps sub-millisecond.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct SimulatedTime(pub f64);
