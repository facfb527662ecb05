use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{PeerLinkError, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend_url: String,
    pub download_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            download_dir: Default::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Loads `peerlink.toml` from the platform config directory, writing a
    /// default one on first run.
    pub fn new() -> Result<Self> {
        let dirs = directories::BaseDirs::new().ok_or(PeerLinkError::NoHomeDir)?;

        let download_dir = dirs.home_dir().join("peerlink-downloads");
        let config_file = dirs.config_dir().join("peerlink.toml");

        let config = Self {
            download_dir,
            ..Default::default()
        };

        let config = if !config_file.exists() {
            log::info!("creating config file at {config_file:?}");
            std::fs::write(&config_file, toml::to_string(&config)?)?;
            config
        } else {
            log::info!("reading config from {config_file:?}");
            toml::from_str(&std::fs::read_to_string(&config_file)?)?
        };

        log::info!("using config: {config:?}");

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
