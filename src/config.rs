use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Discovery API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Timing and capacity knobs for the interaction tracker
///
/// Injectable so tests can drive the debounce and drain machinery; the
/// defaults match production behavior.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Delay after the last trigger before a dispatch fires
    pub debounce: Duration,
    /// Maximum number of events held while offline
    pub queue_capacity: usize,
    /// Pause between successive sends while draining the offline queue
    pub drain_spacing: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
            queue_capacity: 50,
            drain_spacing: Duration::from_millis(100),
        }
    }
}
