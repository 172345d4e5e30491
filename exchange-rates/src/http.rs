//! FXRatesAPI-compatible HTTP provider.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use currency_types::{FetchError, RateProvider, RateSnapshot};

/// Wire shape of the provider's latest-rates response.
///
/// Every field is optional on the wire so that an error-only body still
/// decodes and surfaces as [`FetchError::Api`].
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    base: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    rates: HashMap<String, f64>,
    #[serde(default)]
    error: Option<String>,
}

/// Fetches the latest rates with `GET <base_url>?api=<api_key>`.
pub struct FxRatesApiProvider {
    base_url: String,
    api_key: String,
    http: Client,
}

impl FxRatesApiProvider {
    /// Creates a provider for the given endpoint and credential.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    /// Replaces the underlying HTTP client.
    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }
}

// reqwest errors embed the request URL, which carries the API key.
fn network_error(err: reqwest::Error) -> FetchError {
    FetchError::Network(err.without_url().to_string())
}

#[async_trait]
impl RateProvider for FxRatesApiProvider {
    fn name(&self) -> &str {
        "fxratesapi"
    }

    #[instrument(skip(self), fields(url = %self.base_url))]
    async fn fetch(&self) -> Result<RateSnapshot, FetchError> {
        debug!("Requesting latest exchange rates");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("api", self.api_key.as_str())])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            // The status is what matters here; an unreadable body is dropped.
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "Rate provider returned non-200 response");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(network_error)?;

        let decoded: LatestRatesResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        if let Some(message) = decoded.error.filter(|m| !m.is_empty()) {
            warn!(%message, "Rate provider reported an error");
            return Err(FetchError::Api { message });
        }

        RateSnapshot::new(decoded.base, decoded.date, decoded.rates)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
