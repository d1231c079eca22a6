use std::path::PathBuf;

use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("STORYFILL_STORE_PATH") {
            self.store.path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("STORYFILL_FETCH_TIMEOUT") {
            if let Ok(secs) = v.parse::<u64>() {
                self.fetch.timeout = secs;
            } else {
                tracing::warn!("ignoring invalid STORYFILL_FETCH_TIMEOUT value: {v}");
            }
        }
    }
}
