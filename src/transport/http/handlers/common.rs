use crate::domain::TodoError;
use crate::transport::http::types::ErrorResponse;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

pub fn status_for(err: &TodoError) -> StatusCode {
    match err {
        TodoError::Validation(_) => StatusCode::BAD_REQUEST,
        // An id that cannot be parsed can never match a record, so both backends
        // report it the same way as a missing one.
        TodoError::InvalidId | TodoError::NotFound => StatusCode::NOT_FOUND,
        TodoError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!(error = %self, "storage failure");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Unwraps a JSON body, turning any decode failure into a 400.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, TodoError> {
    match body {
        Ok(Json(v)) => Ok(v),
        Err(e) => {
            warn!(rejection = %e, "invalid JSON body");
            Err(TodoError::Validation("invalid data".to_string()))
        }
    }
}
