pub mod dashboard;
pub mod transactions;

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use state::{ApiSource, FetchError};

use crate::settings;

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let url = settings::get_settings().api_url(endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let err = FetchError::request(endpoint, e);
        log::error!("GET {} - {}", endpoint, err);
        err
    })?;

    if !response.ok() {
        let err = FetchError::status(endpoint, response.status());
        log::error!("GET {} - {}", endpoint, err);
        return Err(err);
    }

    log::trace!("GET {} - Response received, parsing JSON", endpoint);
    let body = response.json::<T>().await.map_err(|e| {
        let err = FetchError::decode(endpoint, e);
        log::error!("GET {} - {}", endpoint, err);
        err
    })?;

    log::info!("GET {} - Success", endpoint);
    Ok(body)
}

/// The browser's view of the REST API, for the shared fetch groups
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserApi;

impl ApiSource for BrowserApi {
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        get(path).await
    }
}
