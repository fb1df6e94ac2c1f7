//! Producer API client (automation pipeline → Dealwire server).
//!
//! All requests carry the shared producer secret as a bearer token.

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::deal::{CreateDealAck, CreateDealRequest};

/// Typed HTTP client for the Dealwire **producer API**.
///
/// The producer API is called by the automation pipeline whenever an
/// eligible deal is detected.
#[derive(Debug, Clone)]
pub struct ProducerClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl ProducerClient {
    /// Create a new `ProducerClient`.
    ///
    /// * `base_url` – root URL of the Dealwire server (e.g. `https://deals.example.com`).
    /// * `token` – the shared producer secret.
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            token: token.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /api/deals` – submit a new deal for broadcast.
    pub async fn create_deal(
        &self,
        payload: CreateDealRequest,
    ) -> Result<CreateDealAck, ClientError> {
        let url = self.base_url.join("/api/deals")?;

        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;

        parse_response(resp).await
    }
}
