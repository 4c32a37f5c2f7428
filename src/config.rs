//! Runtime configuration.
//!
//! A single base-URL value selects the remote authority's host; it is
//! resolved once at startup from the environment (with `.env` support) and
//! handed to the API client and verifier as plain configuration.

use std::path::PathBuf;

use anyhow::Result;

/// Application name used for the data directory path
const APP_NAME: &str = "wayfarer";

/// Default backend host for local development
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the travels backend
    pub api_base_url: String,
    /// Google geocoding API key, if address lookup is enabled
    pub maps_api_key: Option<String>,
    /// Directory backing the file store
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve configuration from the environment.
    ///
    /// Loads a `.env` file if one is present (silently ignored if not),
    /// then reads `WAYFARER_API_URL`, `WAYFARER_MAPS_API_KEY`, and
    /// `WAYFARER_DATA_DIR`.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let api_base_url = std::env::var("WAYFARER_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let maps_api_key = std::env::var("WAYFARER_MAPS_API_KEY").ok();
        let data_dir = match std::env::var("WAYFARER_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => Self::default_data_dir()?,
        };

        Ok(Self {
            api_base_url,
            maps_api_key,
            data_dir,
        })
    }

    fn default_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}
