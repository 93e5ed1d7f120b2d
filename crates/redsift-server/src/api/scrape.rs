use axum::{
    extract::{Path, State},
    Extension, Json,
};
use redsift_pipeline::{fetch_posts, PipelineError, Record};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ErrorCode, ResponseMeta};

const MISSING_QUERY: &str = "Query must be provided";

/// `GET /scrape/{query}`: fetched records, 400 for a blank term, 404 when
/// nothing matched, 500 for any other failure.
pub(super) async fn scrape(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(query): Path<String>,
) -> Result<Json<ApiResponse<Vec<Record>>>, ApiError> {
    if query.trim().is_empty() {
        return Err(ApiError::new(req_id, ErrorCode::BadRequest, MISSING_QUERY));
    }

    let records = match fetch_posts(state.source.as_ref(), &query, &state.fetch).await {
        Ok(records) => records,
        Err(PipelineError::InvalidArgument(message)) => {
            return Err(ApiError::new(req_id, ErrorCode::BadRequest, message));
        }
        Err(e) => {
            tracing::error!(query = %query, error = %e, "scrape failed");
            return Err(ApiError::new(
                req_id,
                ErrorCode::InternalError,
                format!("An error occurred while scraping: {e}"),
            ));
        }
    };

    if records.is_empty() {
        return Err(ApiError::new(
            req_id,
            ErrorCode::NotFound,
            "No posts found for the provided query",
        ));
    }

    tracing::info!(query = %query, records = records.len(), "scrape served");
    Ok(Json(ApiResponse {
        data: records,
        meta: ResponseMeta::new(req_id),
    }))
}

/// `/scrape` and `/scrape/` carry no term at all.
pub(super) async fn missing_query(Extension(req_id): Extension<RequestId>) -> ApiError {
    ApiError::new(req_id, ErrorCode::BadRequest, MISSING_QUERY)
}
