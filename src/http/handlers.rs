use super::state::AppState;
use crate::directory::ListQuery;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::error;

// ============================================================================
// Response Types
// ============================================================================

/// Standard response envelope: `{data, success, message?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            data,
            success: true,
            message: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /interviews
/// List interviews with pagination, status filter and search
pub async fn list_interviews(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let interviews = state.directory.list(&query).await;
    (StatusCode::OK, Json(ApiResponse::ok(interviews)))
}

/// GET /interviews/:interview_id
/// Get one interview with any historical transcript and metrics
pub async fn get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<String>,
) -> impl IntoResponse {
    match state.directory.get(&interview_id).await {
        Some(detail) => (StatusCode::OK, Json(ApiResponse::ok(detail))).into_response(),
        None => {
            error!("Interview {} not found", interview_id);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Interview {} not found", interview_id),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
