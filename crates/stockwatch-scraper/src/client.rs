//! HTTP client for the retailer's `fulfillment-messages` endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use stockwatch_core::WatchConfig;

use crate::error::ScraperError;

/// Fetches raw fulfillment responses.
///
/// One request covers every watched model (`parts.0`, `parts.1`, ...).
/// Non-2xx statuses become [`ScraperError::UnexpectedStatus`]; nothing is
/// retried.
pub struct FulfillmentClient {
    client: Client,
}

impl FulfillmentClient {
    /// Creates a client with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the raw response body for every model in `watch`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if the fulfillment URL cannot be built.
    /// - [`ScraperError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure, including timeouts.
    pub async fn fetch(&self, watch: &WatchConfig) -> Result<String, ScraperError> {
        let url = Self::fulfillment_url(watch)?;
        let referer = Self::referer(watch);

        tracing::debug!(url = %url, "fetching fulfillment messages");

        let response = self
            .client
            .get(url.as_str())
            .header(
                reqwest::header::ACCEPT,
                "application/json, text/javascript, */*; q=0.01",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::REFERER, referer)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }

    /// Builds the query URL: `pl=true`, one `parts.N` per model, then
    /// `store` (first configured store) or `location` (postal code).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if `fulfillment_url` does not parse.
    pub fn fulfillment_url(watch: &WatchConfig) -> Result<String, ScraperError> {
        let mut url =
            Url::parse(&watch.fulfillment_url).map_err(|e| ScraperError::InvalidUrl {
                url: watch.fulfillment_url.clone(),
                reason: e.to_string(),
            })?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("pl", "true");
            for (idx, model) in watch.model_specs().iter().enumerate() {
                query.append_pair(&format!("parts.{idx}"), &model.id);
            }
            if let Some(store) = watch.stores.first() {
                query.append_pair("store", store);
            } else if let Some(location) = &watch.location {
                query.append_pair("location", location);
            }
        }

        Ok(url.to_string())
    }

    /// The product page when configured, otherwise the endpoint's origin.
    fn referer(watch: &WatchConfig) -> String {
        if let Some(product_url) = &watch.product_url {
            return product_url.clone();
        }
        Url::parse(&watch.fulfillment_url).map_or_else(
            |_| watch.fulfillment_url.clone(),
            |u| u.origin().ascii_serialization(),
        )
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
