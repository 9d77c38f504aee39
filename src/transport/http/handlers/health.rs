use crate::storage::TodoStore;
use crate::transport::http::types::{AppState, ErrorResponse, HealthResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (backend reachable)", body = HealthResponse),
        (status = 503, description = "Service is unhealthy (backend unreachable)", body = ErrorResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.todo_service.store();

    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                backend: store.backend().to_string(),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: format!("{} ping failed: {}", store.backend(), e),
            }),
        )
            .into_response(),
    }
}
