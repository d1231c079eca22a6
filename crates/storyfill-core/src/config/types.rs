use std::path::PathBuf;

use serde::Deserialize;
use storyfill_fetch::FetchConfig;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

pub(crate) fn default_store_path() -> PathBuf {
    PathBuf::from("top_100_stories.json")
}

/// Location of the stories file. It is read and then overwritten in place.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}
