//! Reqwest-based adapter for the cards and loans services.
//!
//! Implements the [`DownstreamSources`] port. Every outgoing request carries
//! the caller's correlation identifier unchanged so the distributed trace
//! stays intact across services.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::ports::{DownstreamError, DownstreamSources};
use crate::domain::{CardsDetails, LoansDetails, MobileNumber};
use crate::middleware::correlation::CORRELATION_ID_HEADER;

/// Configuration for the downstream HTTP clients.
#[derive(Debug, Clone)]
pub struct DownstreamSettings {
    cards_base_url: String,
    loans_base_url: String,
    timeout: Duration,
}

impl DownstreamSettings {
    /// Create settings for the given base URLs with a 2 second request
    /// timeout.
    pub fn new(cards_base_url: impl Into<String>, loans_base_url: impl Into<String>) -> Self {
        Self {
            cards_base_url: cards_base_url.into(),
            loans_base_url: loans_base_url.into(),
            timeout: Duration::from_secs(2),
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP implementation of the [`DownstreamSources`] port.
pub struct HttpDownstreamSources {
    client: reqwest::Client,
    cards_base_url: String,
    loans_base_url: String,
}

impl HttpDownstreamSources {
    /// Build the clients from the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`DownstreamError::Request`] when the underlying client
    /// cannot be constructed.
    pub fn new(settings: DownstreamSettings) -> Result<Self, DownstreamError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| DownstreamError::request(err.to_string()))?;

        Ok(Self {
            client,
            cards_base_url: settings.cards_base_url,
            loans_base_url: settings.loans_base_url,
        })
    }

    async fn fetch_section<T>(
        &self,
        base_url: &str,
        mobile_number: &MobileNumber,
        correlation_id: &str,
    ) -> Result<Option<T>, DownstreamError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(fetch_url(base_url))
            .query(&[("mobileNumber", mobile_number.as_str())])
            .header(CORRELATION_ID_HEADER, correlation_id)
            .send()
            .await
            .map_err(|err| DownstreamError::request(err.to_string()))?;

        // A downstream 404 means "no record", not a failure.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .map_err(|err| DownstreamError::request(err.to_string()))?;

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|err| DownstreamError::decode(err.to_string()))
    }
}

fn fetch_url(base_url: &str) -> String {
    format!("{}/api/fetch", base_url.trim_end_matches('/'))
}

#[async_trait]
impl DownstreamSources for HttpDownstreamSources {
    async fn fetch_cards(
        &self,
        mobile_number: &MobileNumber,
        correlation_id: &str,
    ) -> Result<Option<CardsDetails>, DownstreamError> {
        self.fetch_section(&self.cards_base_url, mobile_number, correlation_id)
            .await
    }

    async fn fetch_loans(
        &self,
        mobile_number: &MobileNumber,
        correlation_id: &str,
    ) -> Result<Option<LoansDetails>, DownstreamError> {
        self.fetch_section(&self.loans_base_url, mobile_number, correlation_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://cards:9000", "http://cards:9000/api/fetch")]
    #[case("http://cards:9000/", "http://cards:9000/api/fetch")]
    fn fetch_url_joins_base_and_path(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(fetch_url(base), expected);
    }

    #[rstest]
    fn settings_carry_base_urls_and_timeout() {
        let settings = DownstreamSettings::new("http://cards:9000", "http://loans:8090")
            .with_timeout(Duration::from_millis(500));

        assert_eq!(settings.cards_base_url, "http://cards:9000");
        assert_eq!(settings.loans_base_url, "http://loans:8090");
        assert_eq!(settings.timeout, Duration::from_millis(500));
    }
}
