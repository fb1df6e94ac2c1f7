use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use compact_str::CompactString;
use dealwire_sdk::objects::deal::ReleaseRequest;

use super::OperatorApiError;
use crate::state::AppState;

/// `POST /api/deals/{id}/skip` – decline a pending deal.
///
/// Sent by the frontend on an explicit pass or an expired decision timer.
/// The body is optional; a missing reason is recorded as `unknown`.
pub(super) async fn skip_deal(
    state: State<AppState>,
    Path(id): Path<CompactString>,
    body: Option<Json<ReleaseRequest>>,
) -> Result<impl IntoResponse, OperatorApiError> {
    let reason = body.and_then(|Json(b)| b.reason).unwrap_or_default();
    state.service.release(&id, reason)?;
    Ok(StatusCode::NO_CONTENT)
}
