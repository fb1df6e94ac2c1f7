//! Operator API client (claim / skip / health).

use reqwest::Client;
use url::Url;

use super::{ClientError, expect_success, parse_response};
use crate::objects::deal::{ClaimGrant, HealthResponse, ReleaseRequest, SkipReason};

/// Typed HTTP client for the Dealwire **operator API**.
///
/// Claiming is irrevocable: the first successful claim wins and is the
/// only call that ever receives the deal's contact field.
#[derive(Debug, Clone)]
pub struct OperatorClient {
    http: Client,
    base_url: Url,
}

impl OperatorClient {
    /// Create a new `OperatorClient` for the given server root URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /api/deals/{id}/claim` – claim a pending deal.
    ///
    /// Returns the contact field and reference URL on success. A deal that
    /// was already claimed or skipped answers with a conflict, surfaced as
    /// [`ClientError::Api`] with status 409.
    pub async fn claim(&self, deal_id: &str) -> Result<ClaimGrant, ClientError> {
        let url = self.base_url.join(&format!("/api/deals/{deal_id}/claim"))?;
        let resp = self.http.post(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/deals/{id}/skip` – decline a pending deal.
    pub async fn skip(
        &self,
        deal_id: &str,
        reason: Option<SkipReason>,
    ) -> Result<(), ClientError> {
        let url = self.base_url.join(&format!("/api/deals/{deal_id}/skip"))?;
        let resp = self
            .http
            .post(url)
            .json(&ReleaseRequest { reason })
            .send()
            .await?;
        expect_success(resp).await
    }

    /// `GET /api/health` – server liveness and store size.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.base_url.join("/api/health")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }
}
