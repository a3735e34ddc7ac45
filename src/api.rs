use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use state::{ApiSource, FetchError};
use tracing::{debug, error, info, instrument, trace};

use crate::config::Settings;

/// Thin reqwest wrapper around the analytics REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.api_base_url.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    /// Common GET request handler
    #[instrument(skip(self))]
    pub async fn get<T>(&self, endpoint: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET request to: {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            let err = FetchError::request(endpoint, e);
            error!("GET {} - {}", endpoint, err);
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = FetchError::status(endpoint, status.as_u16());
            error!("GET {} - {}", endpoint, err);
            return Err(err);
        }

        trace!("GET {} - Response received, parsing JSON", endpoint);
        let body = response.json::<T>().await.map_err(|e| {
            let err = FetchError::decode(endpoint, e);
            error!("GET {} - {}", endpoint, err);
            err
        })?;

        info!("GET {} - Success", endpoint);
        Ok(body)
    }
}

impl ApiSource for ApiClient {
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        self.get(path).await
    }
}
