//! Producer API handlers.
//!
//! These endpoints are called by the automation pipeline and carry the
//! shared producer secret as a bearer token.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use compact_str::format_compact;
use dealwire_core::service::IngestError;
use dealwire_sdk::objects::deal::{CreateDealAck, CreateDealRequest};
use uuid::Uuid;

use crate::api::extractors::ProducerToken;
use crate::state::AppState;

/// Build the producer API router.
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/deals", post(create_deal))
        .route("/test-deal", get(test_deal))
}

/// `POST /api/deals` – submit a new deal.
///
/// Stores the deal with status `pending` and fans a redacted announcement
/// out to every connected operator. The response acknowledges receipt
/// without echoing the stored deal.
async fn create_deal(
    state: State<AppState>,
    _token: ProducerToken,
    Json(payload): Json<CreateDealRequest>,
) -> Result<impl IntoResponse, ProducerApiError> {
    let deal_id = payload.id.clone();
    state.service.ingest(payload)?;

    Ok((StatusCode::CREATED, Json(CreateDealAck { deal_id })))
}

/// `GET /api/test-deal` – inject a sample deal without the pipeline.
///
/// Exercises the normal ingest path end to end (broadcast included) so an
/// operator frontend can be tested standalone. Answers 404 unless
/// `server.enable_test_endpoint` is set.
async fn test_deal(state: State<AppState>) -> Result<impl IntoResponse, ProducerApiError> {
    if !state.config.server.read().await.enable_test_endpoint {
        return Err(ProducerApiError::TestEndpointDisabled);
    }

    let payload = CreateDealRequest {
        id: format_compact!("test-{}", Uuid::new_v4()),
        channel: Some("Paid Social".into()),
        source: Some("Operator feed smoke test".into()),
        program: Some("Demo program".into()),
        contact: "06 12 34 56 78".into(),
        reference_url: Some("https://crm.example.com/deals/test".into()),
    };
    let deal_id = payload.id.clone();
    state.service.ingest(payload)?;

    tracing::info!(%deal_id, "test deal injected");
    Ok((StatusCode::CREATED, Json(CreateDealAck { deal_id })))
}

/// Errors that can occur in producer API handlers.
#[derive(Debug)]
enum ProducerApiError {
    /// A mandatory field was missing or empty.
    Validation(&'static str),
    /// The deal id is already live.
    Duplicate,
    /// `GET /api/test-deal` while the gate is off.
    TestEndpointDisabled,
}

impl From<IngestError> for ProducerApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Validation(field) => ProducerApiError::Validation(field),
            IngestError::Duplicate(_) => ProducerApiError::Duplicate,
        }
    }
}

impl IntoResponse for ProducerApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ProducerApiError::Validation(field) => (
                StatusCode::BAD_REQUEST,
                format!("missing required field `{field}`"),
            )
                .into_response(),
            ProducerApiError::Duplicate => {
                (StatusCode::CONFLICT, "deal already exists").into_response()
            }
            ProducerApiError::TestEndpointDisabled => {
                (StatusCode::NOT_FOUND, "not found").into_response()
            }
        }
    }
}
