//! JSON envelope, routing, and the health check.

mod scrape;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use redsift_core::{AppConfig, FetchSettings};
use redsift_reddit::SourceClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};
use crate::ui;

/// Handler state. One source client serves every request.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn SourceClient>,
    pub fetch: FetchSettings,
    /// Per-topic post limit for the search page.
    pub ui_post_limit: usize,
}

impl AppState {
    #[must_use]
    pub fn from_config(config: &AppConfig, source: Arc<dyn SourceClient>) -> Self {
        Self {
            source,
            fetch: config.fetch.clone(),
            ui_post_limit: config.ui_post_limit,
        }
    }
}

/// Success envelope: `{"data": ..., "meta": {...}}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(crate) fn new(request_id: RequestId) -> Self {
        Self {
            request_id: request_id.0,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    InternalError,
}

impl ErrorCode {
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error envelope: `{"error": {"code", "message"}, "meta": {...}}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(request_id: RequestId, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code,
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.error.code.status(), Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

/// Routes: the search page at `/`, `/scrape/{query}`, and `/api/v1/health`.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::search_page))
        .route("/api/v1/health", get(health))
        .route("/scrape", get(scrape::missing_query))
        .route("/scrape/", get(scrape::missing_query))
        .route("/scrape/{query}", get(scrape::scrape))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

async fn health(Extension(req_id): Extension<RequestId>) -> Json<ApiResponse<Health>> {
    Json(ApiResponse {
        data: Health { status: "ok" },
        meta: ResponseMeta::new(req_id),
    })
}
