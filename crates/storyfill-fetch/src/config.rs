use serde::Deserialize;

fn default_fetch_timeout() -> u64 {
    10
}

/// Settings for page fetching.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Per-request budget in seconds, connect and read combined.
    #[serde(default = "default_fetch_timeout")]
    pub timeout: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_fetch_timeout(),
        }
    }
}
