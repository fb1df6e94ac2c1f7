//! HTTP and WebSocket clients for the Dealwire APIs.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest` or `tokio-tungstenite`.

mod feed;
mod operator;
mod producer;

pub use feed::DealFeed;
pub use operator::OperatorClient;
pub use producer::ProducerClient;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Errors produced by the SDK clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The base URL scheme cannot be mapped to `ws`/`wss`.
    #[error("unsupported websocket scheme: {0}")]
    WsScheme(String),

    /// WebSocket transport failure.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Deserialize a 2xx response body, or turn a non-2xx response into
/// [`ClientError::Api`] with the body preserved for diagnostics.
pub(crate) async fn parse_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(ClientError::Json)
}

/// Check a response for success, discarding any body.
pub(crate) async fn expect_success(resp: reqwest::Response) -> Result<(), ClientError> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(ClientError::Api { status, body })
    }
}
