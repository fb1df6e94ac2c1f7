//! Custom Axum extractors for request authentication.
//!
//! Provides `ProducerToken`, which verifies the `Authorization: Bearer`
//! header against the shared producer secret. Only the producer API uses
//! it; claim and skip are deliberately open (see DESIGN notes).

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// An Axum extractor that authenticates the automation pipeline.
///
/// # Header format
///
/// ```text
/// Authorization: Bearer {producer_token}
/// ```
///
/// The comparison is constant-time so the token cannot be probed
/// byte-by-byte through response timing.
pub struct ProducerToken;

/// Errors that can occur during producer-token verification.
#[derive(Debug, thiserror::Error)]
pub enum ProducerTokenError {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("malformed Authorization header")]
    InvalidHeader,
    #[error("invalid producer token")]
    InvalidToken,
}

impl IntoResponse for ProducerTokenError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ProducerTokenError::MissingHeader => {
                (StatusCode::UNAUTHORIZED, "missing Authorization header")
            }
            ProducerTokenError::InvalidHeader => {
                (StatusCode::BAD_REQUEST, "malformed Authorization header")
            }
            ProducerTokenError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "invalid producer token")
            }
        };
        (status, message).into_response()
    }
}

impl FromRequestParts<AppState> for ProducerToken {
    type Rejection = ProducerTokenError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(ProducerTokenError::MissingHeader)?
            .to_str()
            .map_err(|_| ProducerTokenError::InvalidHeader)?;

        let presented = header_value
            .strip_prefix("Bearer ")
            .ok_or(ProducerTokenError::InvalidHeader)?;

        let producer = state.config.producer.read().await;
        ring::constant_time::verify_slices_are_equal(
            presented.as_bytes(),
            producer.token_bytes(),
        )
        .map_err(|_| ProducerTokenError::InvalidToken)?;

        Ok(ProducerToken)
    }
}
