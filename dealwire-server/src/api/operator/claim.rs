use axum::{
    Json,
    extract::{Path, State},
};
use compact_str::CompactString;
use dealwire_sdk::objects::deal::ClaimGrant;

use super::OperatorApiError;
use crate::state::AppState;

/// `POST /api/deals/{id}/claim` – claim a pending deal.
///
/// The winning call is the only place the contact field ever leaves the
/// store; the downstream pipeline is notified asynchronously and never
/// delays this response. Losers of the race get a conflict.
pub(super) async fn claim_deal(
    state: State<AppState>,
    Path(id): Path<CompactString>,
) -> Result<Json<ClaimGrant>, OperatorApiError> {
    let grant = state.service.claim(&id)?;
    Ok(Json(grant))
}
