//! Main server implementation
//!
//! Builds the axum router over the shared store and maps each request through
//! validate -> dispatch -> respond. Handlers hold no cross-request state; the
//! store is the only shared mutable component and is owned by [`AppState`].

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use wonders_core::{seed_if_empty, StoreError, Wonder, WonderDraft, WonderStore};

use crate::config::ServerConfig;
use crate::{ApiError, Result};

/// State shared across handlers
pub struct AppState {
    pub config: ServerConfig,
    pub store: WonderStore,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            store: WonderStore::new(),
        }
    }
}

/// Main server: owns the shared state, seeds the store, builds the router and
/// runs the accept loop.
pub struct WondersServer {
    state: Arc<AppState>,
}

impl WondersServer {
    /// Create a new server with configuration
    pub fn new(config: ServerConfig) -> Self {
        let state = Arc::new(AppState::new(config));
        Self { state }
    }

    /// Get the shared state
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Seed the store from the configured file if it is empty.
    ///
    /// Best-effort: a missing or malformed seed file leaves the store empty
    /// and the server running.
    pub fn seed(&self) {
        let path = std::path::Path::new(&self.state.config.seed_path);
        if let Err(e) = seed_if_empty(&self.state.store, path) {
            tracing::warn!("skipping seed data: {}", e);
        }
    }

    /// Build the axum router
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/wonders", get(Self::handle_list).post(Self::handle_create))
            .route("/wonders/random", get(Self::handle_random))
            .route(
                "/wonders/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Seed the store, then serve until the listener fails.
    pub async fn start(&self) -> Result<()> {
        self.seed();

        let addr = self.state.config.socket_addr()?;
        let router = self.build_router();

        tracing::info!("Wonders API listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(())
    }

    // HTTP handlers

    async fn handle_health() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "healthy",
            "version": crate::VERSION
        }))
    }

    async fn handle_list(State(state): State<Arc<AppState>>) -> Json<Vec<Wonder>> {
        let wonders = state.store.list();
        tracing::info!("fetched {} wonders", wonders.len());
        Json(wonders)
    }

    async fn handle_get(
        State(state): State<Arc<AppState>>,
        Path(id): Path<String>,
    ) -> Result<Json<Wonder>> {
        let id = parse_id(&id)?;
        let wonder = state.store.get(id).ok_or(StoreError::NotFound(id))?;
        Ok(Json(wonder))
    }

    async fn handle_create(
        State(state): State<Arc<AppState>>,
        body: Bytes,
    ) -> Result<Response> {
        let draft = parse_body(&body)?;
        let id = state.store.insert(draft);

        // a record inserted under this lock cannot vanish before the read,
        // but the contract says no raw fault escapes this layer
        let wonder = state
            .store
            .get(id)
            .ok_or_else(|| ApiError::Internal(format!("wonder {} missing after insert", id)))?;

        tracing::info!("created new wonder {}: {}", id, wonder.name);
        let location = format!("/wonders/{}", id);
        Ok((
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(wonder),
        )
            .into_response())
    }

    async fn handle_update(
        State(state): State<Arc<AppState>>,
        Path(id): Path<String>,
        body: Bytes,
    ) -> Result<StatusCode> {
        let id = parse_id(&id)?;
        let draft = parse_body(&body)?;
        if draft.id != 0 && draft.id != id {
            return Err(ApiError::IdMismatch {
                path: id,
                body: draft.id,
            });
        }

        state.store.update(id, draft)?;
        tracing::info!("updated wonder with id {}", id);
        Ok(StatusCode::NO_CONTENT)
    }

    async fn handle_delete(
        State(state): State<Arc<AppState>>,
        Path(id): Path<String>,
    ) -> Result<StatusCode> {
        let id = parse_id(&id)?;
        state.store.delete(id)?;
        tracing::info!("deleted wonder with id {}", id);
        Ok(StatusCode::NO_CONTENT)
    }

    async fn handle_random(State(state): State<Arc<AppState>>) -> Result<Json<Wonder>> {
        let wonder = state.store.pick_random()?;
        tracing::info!("returned random wonder: {}", wonder.name);
        Ok(Json(wonder))
    }
}

/// Parse a path segment as a wonder id; non-numeric input is a client error,
/// never a framework rejection or a not-found.
fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| ApiError::InvalidArgument(format!("invalid wonder id: {}", raw)))
}

/// Decode and validate a request body into a draft.
fn parse_body(body: &[u8]) -> Result<WonderDraft> {
    if body.is_empty() {
        return Err(ApiError::InvalidArgument(
            "request body is required".to_string(),
        ));
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidArgument(format!("request body is not valid JSON: {}", e)))?;
    if value.is_null() {
        return Err(ApiError::InvalidArgument(
            "request body is required".to_string(),
        ));
    }
    let draft =
        WonderDraft::from_value(&value).map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
    if draft.name.trim().is_empty() {
        return Err(ApiError::InvalidArgument(
            "field `name` must not be empty".to_string(),
        ));
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    fn server_with(names: &[&str]) -> WondersServer {
        let server = WondersServer::new(ServerConfig::default());
        for name in names {
            server.state().store.insert(WonderDraft {
                name: (*name).to_string(),
                ..Default::default()
            });
        }
        server
    }

    async fn send(
        server: &WondersServer,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value, Option<String>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = server.build_router().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value, location)
    }

    #[tokio::test]
    async fn test_list_empty_store_is_success() {
        let server = server_with(&[]);
        let (status, body, _) = send(&server, "GET", "/wonders", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_is_bad_request_not_not_found() {
        let server = server_with(&["Petra"]);
        let (status, body, _) = send(&server, "GET", "/wonders/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid wonder id: abc");
    }

    #[tokio::test]
    async fn test_get_missing_id_is_not_found() {
        let server = server_with(&[]);
        let (status, body, _) = send(&server, "GET", "/wonders/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Wonder with ID 42 not found");
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_location() {
        let server = server_with(&[]);
        let payload = json!({
            "id": 99,
            "name": "Pyramids of Giza",
            "country": "Egypt",
            "era": "Ancient",
            "type": "Tomb",
            "description": "Tombs on the Giza plateau.",
            "discoveryYear": -2560
        });
        let (status, body, location) = send(&server, "POST", "/wonders", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        // client-supplied id is ignored, the store assigns its own
        assert_eq!(body["id"], 1);
        assert_eq!(body["discoveryYear"], -2560);
        assert_eq!(body["type"], "Tomb");
        assert_eq!(location.as_deref(), Some("/wonders/1"));
    }

    #[tokio::test]
    async fn test_create_accepts_case_insensitive_fields() {
        let server = server_with(&[]);
        let payload = json!({ "NAME": "Petra", "Country": "Jordan" });
        let (status, body, _) = send(&server, "POST", "/wonders", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Petra");
        assert_eq!(body["country"], "Jordan");
    }

    #[tokio::test]
    async fn test_create_without_body_is_bad_request() {
        let server = server_with(&[]);
        let (status, body, _) = send(&server, "POST", "/wonders", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "request body is required");
    }

    #[tokio::test]
    async fn test_create_requires_non_empty_name() {
        let server = server_with(&[]);
        let (status, body, _) =
            send(&server, "POST", "/wonders", Some(json!({ "country": "Egypt" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "field `name` must not be empty");

        let (status, _, _) =
            send(&server, "POST", "/wonders", Some(json!({ "name": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_field_types() {
        let server = server_with(&[]);
        let payload = json!({ "name": "Petra", "discoveryYear": "old" });
        let (status, body, _) = send(&server, "POST", "/wonders", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "field `discoveryYear` must be an integer");
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let server = server_with(&["Pyramids of Giza"]);
        let payload = json!({ "name": "Great Pyramid", "country": "Egypt" });
        let (status, body, _) = send(&server, "PUT", "/wonders/1", Some(payload)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (_, body, _) = send(&server, "GET", "/wonders/1", None).await;
        assert_eq!(body["name"], "Great Pyramid");
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_update_with_matching_body_id_is_allowed() {
        let server = server_with(&["Petra"]);
        let payload = json!({ "id": 1, "name": "Petra, Jordan" });
        let (status, _, _) = send(&server, "PUT", "/wonders/1", Some(payload)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_update_id_mismatch_is_bad_request() {
        let server = server_with(&["Petra"]);
        let payload = json!({ "id": 2, "name": "Petra" });
        let (status, body, _) = send(&server, "PUT", "/wonders/1", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "id 2 in body does not match id 1 in path");
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let server = server_with(&[]);
        let payload = json!({ "name": "Petra" });
        let (status, _, _) = send(&server, "PUT", "/wonders/7", Some(payload)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let server = server_with(&["Petra"]);
        let (status, body, _) = send(&server, "DELETE", "/wonders/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _, _) = send(&server, "GET", "/wonders/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(&server, "DELETE", "/wonders/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_non_numeric_id_is_bad_request() {
        let server = server_with(&["Petra"]);
        let (status, _, _) = send(&server, "DELETE", "/wonders/one", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_random_on_empty_store_is_not_found() {
        let server = server_with(&[]);
        let (status, body, _) = send(&server, "GET", "/wonders/random", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "no wonders available");
    }

    #[tokio::test]
    async fn test_random_returns_a_live_record() {
        let server = server_with(&["Petra", "Colosseum"]);
        let (status, body, _) = send(&server, "GET", "/wonders/random", None).await;
        assert_eq!(status, StatusCode::OK);
        let name = body["name"].as_str().unwrap();
        assert!(name == "Petra" || name == "Colosseum");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = server_with(&[]);
        let (status, body, _) = send(&server, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}
