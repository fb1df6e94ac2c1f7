//! Operator API handlers.
//!
//! Called by the operator frontend. Claim and skip are the two terminal
//! decisions on a pending deal; the WebSocket feed delivers the redacted
//! announcements they act on.

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use dealwire_core::store::TransitionError;

use crate::state::AppState;

mod claim;
mod skip;
mod ws;

/// Build the operator API router.
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/deals/{id}/claim", post(claim::claim_deal))
        .route("/deals/{id}/skip", post(skip::skip_deal))
        .route("/ws", get(ws::deal_feed_ws))
}

/// Errors that can occur in operator API handlers.
///
/// "No such deal" and "someone else got there first" are deliberately
/// distinct outcomes.
#[derive(Debug)]
enum OperatorApiError {
    /// No live deal has this id.
    NotFound,
    /// The deal already left `pending`; the caller lost the race.
    AlreadyResolved,
}

impl From<TransitionError> for OperatorApiError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::NotFound => OperatorApiError::NotFound,
            TransitionError::AlreadyResolved => OperatorApiError::AlreadyResolved,
        }
    }
}

impl IntoResponse for OperatorApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            OperatorApiError::NotFound => {
                (StatusCode::NOT_FOUND, "deal not found").into_response()
            }
            OperatorApiError::AlreadyResolved => {
                (StatusCode::CONFLICT, "deal already processed").into_response()
            }
        }
    }
}
