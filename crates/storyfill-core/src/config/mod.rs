mod env;
mod types;


pub use types::*;

use std::path::Path;

use anyhow::{Context, bail};

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if the stories path is empty or the fetch timeout is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.store.path.as_os_str().is_empty() {
            bail!("store.path must not be empty");
        }
        if self.fetch.timeout == 0 {
            bail!("fetch.timeout must be at least 1 second");
        }
        Ok(())
    }
}
