use std::env;

/// Environment-driven viewer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// `AERIAL_API_KEY`; the aerial imagery layers run disabled
    /// without it.
    pub aerial_api_key: Option<String>,
    /// `CAPABILITY_URL`: capability service for the osm/overlay
    /// layers.
    pub capability_service: String,
    /// `SIM_MILLIS_PER_DAY`: real milliseconds per simulated day.
    pub simulated_millis_per_day: f64,
    /// `VIEWER_FRAMES`: frames to run before exiting.
    pub frames: u64,
    /// `VIEWER_FRAME_MS`: delay between frames.
    pub frame_interval_ms: u64,
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self {
            aerial_api_key: env::var("AERIAL_API_KEY").ok().filter(|k| !k.is_empty()),
            capability_service: env::var("CAPABILITY_URL")
                .unwrap_or_else(|_| "https://tiles.maps.eox.at/capabilities.json".to_string()),
            simulated_millis_per_day: env_var_f64("SIM_MILLIS_PER_DAY", 8_000.0),
            frames: env_var_u64("VIEWER_FRAMES", 600),
            frame_interval_ms: env_var_u64("VIEWER_FRAME_MS", 16),
        }
    }
}

fn env_var_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_var_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
