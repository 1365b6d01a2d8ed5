use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use scry_domain::resource::Resource;
use scry_service::Error as ServiceError;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/memories", get(list_memories))
        .route("/v1/memories/{memory_id}", get(get_memory))
        .route("/v1/memories/{memory_id}/actors", get(list_actors))
        .route(
            "/v1/memories/{memory_id}/actors/{actor_id}/sessions",
            get(list_sessions),
        )
        .route(
            "/v1/memories/{memory_id}/actors/{actor_id}/sessions/{session_id}/events",
            get(list_events),
        )
        .route(
            "/v1/memories/{memory_id}/actors/{actor_id}/sessions/{session_id}/events/{event_id}",
            get(get_event),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    max_results: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ListingBody {
    items: Vec<Resource>,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    catalog_ready: bool,
    timestamp: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "healthy",
        catalog_ready: state.service.catalog_ready(),
        timestamp: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
    })
}

async fn list_memories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListingBody>, ApiError> {
    let items = state.service.list_memories(query.max_results).await?;
    Ok(Json(ListingBody { items }))
}

async fn get_memory(
    State(state): State<AppState>,
    Path(memory_id): Path<String>,
) -> Result<Json<Resource>, ApiError> {
    let memory = state.service.get_memory(&memory_id).await?;
    Ok(Json(memory))
}

async fn list_actors(
    State(state): State<AppState>,
    Path(memory_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListingBody>, ApiError> {
    let items = state
        .service
        .list_actors(&memory_id, query.max_results)
        .await?;
    Ok(Json(ListingBody { items }))
}

async fn list_sessions(
    State(state): State<AppState>,
    Path((memory_id, actor_id)): Path<(String, String)>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListingBody>, ApiError> {
    let items = state
        .service
        .list_sessions(&memory_id, &actor_id, query.max_results)
        .await?;
    Ok(Json(ListingBody { items }))
}

async fn list_events(
    State(state): State<AppState>,
    Path((memory_id, actor_id, session_id)): Path<(String, String, String)>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListingBody>, ApiError> {
    let items = state
        .service
        .list_events(&memory_id, &actor_id, &session_id, query.max_results)
        .await?;
    Ok(Json(ListingBody { items }))
}

async fn get_event(
    State(state): State<AppState>,
    Path((memory_id, actor_id, session_id, event_id)): Path<(String, String, String, String)>,
) -> Result<Json<Resource>, ApiError> {
    let event = state
        .service
        .get_event(&memory_id, &actor_id, &session_id, &event_id)
        .await?;
    Ok(Json(event))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error_code: String,
    message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error_code: String,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let (status, error_code) = match &err {
            ServiceError::UpstreamUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable")
            }
            ServiceError::BaseListing { .. } => (StatusCode::BAD_GATEWAY, "base_listing_failed"),
            ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
        };
        ApiError::new(status, error_code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error_code: self.error_code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
