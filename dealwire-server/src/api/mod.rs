//! HTTP API surface.
//!
//! # Endpoints
//!
//! - `POST /api/deals`            – submit a deal (producer, bearer secret)
//! - `GET  /api/test-deal`        – inject a sample deal (config-gated)
//! - `POST /api/deals/{id}/claim` – claim a pending deal
//! - `POST /api/deals/{id}/skip`  – decline a pending deal
//! - `GET  /api/ws`               – operator deal feed (WebSocket)
//! - `GET  /api/health`           – liveness and store size
//!
//! Callers can tell the three failure classes apart: 400 for malformed
//! input, 404 for an unknown id, 409 for a deal that is already taken
//! (duplicate submission or lost claim race).

pub mod extractors;
mod operator;
mod producer;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use dealwire_sdk::objects::deal::HealthResponse;

use crate::state::AppState;

/// Build the `/api` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(producer::router())
        .merge(operator::router())
        .route("/health", get(health_check))
}

/// Liveness check: process uptime and the live deal count.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        deals_in_memory: state.service.store_size(),
    })
}

#[cfg(test)]
mod tests {
    use crate::config::runtime::{ProducerConfig, ServerConfig, SharedConfig, WebhookConfig};
    use crate::server::build_router;
    use crate::state::AppState;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use dealwire_core::events::{
        AnnouncementReceiver, DealClaimedReceiver, announcement_channel, deal_claimed_channel,
    };
    use dealwire_core::service::DealService;
    use dealwire_core::store::DealStore;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    const TOKEN: &str = "test-producer-token";

    struct TestApp {
        router: Router,
        service: Arc<DealService>,
        feed_rx: AnnouncementReceiver,
        claimed_rx: DealClaimedReceiver,
    }

    fn test_app(enable_test_endpoint: bool) -> TestApp {
        let store = Arc::new(DealStore::new());
        let announcements = announcement_channel();
        let feed_rx = announcements.subscribe();
        let (claimed_tx, claimed_rx) = deal_claimed_channel();
        let service = Arc::new(DealService::new(store, announcements.clone(), claimed_tx));

        let config = SharedConfig {
            server: Arc::new(RwLock::new(ServerConfig {
                listen: "127.0.0.1:0".parse().unwrap(),
                enable_test_endpoint,
            })),
            producer: Arc::new(RwLock::new(ProducerConfig::new(TOKEN.as_bytes()))),
            webhook: Arc::new(RwLock::new(WebhookConfig::default())),
        };

        let state = AppState::new(service.clone(), announcements, config);
        TestApp {
            router: build_router(state),
            service,
            feed_rx,
            claimed_rx,
        }
    }

    async fn send(router: &Router, request: Request<Body>) -> Response {
        router.clone().oneshot(request).await.unwrap()
    }

    fn create_deal(id: &str, contact: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/api/deals")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
            .body(Body::from(format!(
                r#"{{"id":"{id}","contact":"{contact}"}}"#
            )))
            .unwrap()
    }

    fn post(uri: &str, json_body: Option<&str>) -> Request<Body> {
        let builder = Request::builder().method(Method::POST).uri(uri);
        match json_body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_owned()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok_and_store_size() {
        let app = test_app(false);
        let _ = send(&app.router, create_deal("d1", "0601020304", Some(TOKEN))).await;

        let response = send(
            &app.router,
            Request::builder().uri("/api/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
        assert_eq!(json["deals_in_memory"], 1);
    }

    #[tokio::test]
    async fn create_deal_requires_the_producer_token() {
        let app = test_app(false);

        let missing = send(&app.router, create_deal("d1", "x", None)).await;
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let wrong = send(&app.router, create_deal("d1", "x", Some("not-the-token"))).await;
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

        let malformed = send(
            &app.router,
            Request::builder()
                .method(Method::POST)
                .uri("/api/deals")
                .header(header::AUTHORIZATION, "Token abc")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"id":"d1","contact":"x"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

        assert_eq!(app.service.store_size(), 0);
    }

    #[tokio::test]
    async fn create_deal_broadcasts_a_redacted_announcement() {
        let mut app = test_app(false);

        let response = send(&app.router, create_deal("d1", "0601020304", Some(TOKEN))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["deal_id"], "d1");

        let announcement = app.feed_rx.try_recv().unwrap();
        assert_eq!(announcement.id, "d1");
        let serialized = serde_json::to_string(&announcement).unwrap();
        assert!(!serialized.contains("contact"));
        assert!(!serialized.contains("0601020304"));

        // Exactly one broadcast per successful create.
        assert!(app.feed_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn duplicate_create_conflicts_and_keeps_the_first_deal() {
        let app = test_app(false);
        let _ = send(&app.router, create_deal("d1", "first", Some(TOKEN))).await;

        let second = send(&app.router, create_deal("d1", "second", Some(TOKEN))).await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(app.service.get("d1").unwrap().contact, "first");
    }

    #[tokio::test]
    async fn create_rejects_empty_and_missing_fields() {
        let app = test_app(false);

        let empty_contact = send(&app.router, create_deal("d1", "", Some(TOKEN))).await;
        assert_eq!(empty_contact.status(), StatusCode::BAD_REQUEST);

        let missing_contact = send(
            &app.router,
            Request::builder()
                .method(Method::POST)
                .uri("/api/deals")
                .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"id":"d1"}"#))
                .unwrap(),
        )
        .await;
        assert!(missing_contact.status().is_client_error());

        assert_eq!(app.service.store_size(), 0);
    }

    #[tokio::test]
    async fn claim_releases_the_contact_exactly_once() {
        let mut app = test_app(false);
        let _ = send(&app.router, create_deal("d1", "0601020304", Some(TOKEN))).await;

        let claim = send(&app.router, post("/api/deals/d1/claim", None)).await;
        assert_eq!(claim.status(), StatusCode::OK);
        let grant = body_json(claim).await;
        assert_eq!(grant["contact"], "0601020304");

        let event = app.claimed_rx.try_recv().unwrap();
        assert_eq!(event.id, "d1");

        let second = send(&app.router, post("/api/deals/d1/claim", None)).await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert!(app.claimed_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn skipped_deals_answer_later_claims_with_a_conflict() {
        let mut app = test_app(false);
        let _ = send(&app.router, create_deal("d2", "x", Some(TOKEN))).await;

        let skip = send(
            &app.router,
            post("/api/deals/d2/skip", Some(r#"{"reason":"timeout"}"#)),
        )
        .await;
        assert_eq!(skip.status(), StatusCode::NO_CONTENT);

        use dealwire_sdk::objects::deal::SkipReason;
        let stored = app.service.get("d2").unwrap();
        assert_eq!(stored.skip_reason, Some(SkipReason::Timeout));

        let claim = send(&app.router, post("/api/deals/d2/claim", None)).await;
        assert_eq!(claim.status(), StatusCode::CONFLICT);
        // Skips never queue a downstream notification.
        assert!(app.claimed_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn skip_without_a_body_records_an_unknown_reason() {
        let app = test_app(false);
        let _ = send(&app.router, create_deal("d3", "x", Some(TOKEN))).await;

        let skip = send(&app.router, post("/api/deals/d3/skip", None)).await;
        assert_eq!(skip.status(), StatusCode::NO_CONTENT);

        use dealwire_sdk::objects::deal::SkipReason;
        let stored = app.service.get("d3").unwrap();
        assert_eq!(stored.skip_reason, Some(SkipReason::Unknown));
    }

    #[tokio::test]
    async fn claim_of_an_unknown_id_is_not_found() {
        let app = test_app(false);
        let response = send(&app.router, post("/api/deals/unknown/claim", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deal_endpoint_is_gated_by_config() {
        let app = test_app(false);
        let disabled = send(
            &app.router,
            Request::builder().uri("/api/test-deal").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(disabled.status(), StatusCode::NOT_FOUND);

        let mut app = test_app(true);
        let enabled = send(
            &app.router,
            Request::builder().uri("/api/test-deal").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(enabled.status(), StatusCode::CREATED);
        // The sample deal rides the normal ingest path, broadcast included.
        assert!(app.feed_rx.try_recv().is_ok());
    }
}
