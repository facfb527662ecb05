pub mod code;
pub mod config;
pub mod error;
pub mod models;
pub mod transfer;

use config::Config;

/// Handle to the PeerLink transfer backend. Cheap to clone; the underlying
/// HTTP client is shared and stateless across batches.
#[derive(Clone)]
pub struct Client {
    pub config: Config,
    pub http: reqwest::Client,
}

impl Client {
    /// Client using the config file (written with defaults on first run).
    pub fn new() -> error::Result<Self> {
        Self::with_config(Config::new()?)
    }

    pub fn with_config(config: Config) -> error::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { config, http })
    }
}
