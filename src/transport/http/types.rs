use crate::app::todo_service::TodoService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub todo_service: TodoService,
}

impl AppState {
    pub fn new(todo_service: TodoService) -> Self {
        Self { todo_service }
    }
}

/// Body of every non-2xx response.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// `memory` or `postgres`.
    pub backend: String,
}
