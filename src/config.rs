use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime settings of the command line client
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Base URL of the REST API, without a trailing slash
    pub api_base_url: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Command line flags take precedence over every configuration source.
    pub fn with_overrides(mut self, api_url: Option<String>, page_size: Option<u32>) -> Self {
        if let Some(url) = api_url {
            self.api_base_url = url;
        }
        if let Some(size) = page_size {
            self.page_size = size.max(1);
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Load settings from defaults, `paydash.toml` (or `path`) and `PAYDASH_*`
/// environment variables, in increasing priority. `.env` is read first.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    dotenvy::dotenv().ok();

    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("paydash").required(false),
    };

    let settings: Settings = Config::builder()
        .set_default("api_base_url", DEFAULT_API_BASE_URL)?
        .set_default("page_size", i64::from(DEFAULT_PAGE_SIZE))?
        .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .add_source(file)
        .add_source(Environment::with_prefix("PAYDASH"))
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    Ok(settings.with_overrides(None, None))
}
