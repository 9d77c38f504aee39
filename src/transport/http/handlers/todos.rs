use crate::domain::{Todo, TodoError, TodoPayload};
use crate::transport::http::handlers::common::json_body;
use crate::transport::http::types::{AppState, ErrorResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/todos",
    responses(
        (status = 200, description = "All todos, oldest first", body = Vec<Todo>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_todos_handler(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, TodoError> {
    Ok(Json(state.todo_service.list().await?))
}

#[utoipa::path(
    post,
    path = "/todos",
    request_body = TodoPayload,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 400, description = "Missing item or malformed body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_todo_handler(
    State(state): State<AppState>,
    body: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<impl IntoResponse, TodoError> {
    let payload = json_body(body)?;
    let todo = state.todo_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

#[utoipa::path(
    get,
    path = "/todos/{id}",
    params(("id" = String, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "The todo", body = Todo),
        (status = 404, description = "Unknown or invalid id", body = ErrorResponse)
    )
)]
pub async fn get_todo_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, TodoError> {
    Ok(Json(state.todo_service.fetch(&id).await?))
}

#[utoipa::path(
    patch,
    path = "/todos/{id}",
    params(("id" = String, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Todo with `completed` flipped", body = Todo),
        (status = 404, description = "Unknown or invalid id", body = ErrorResponse)
    )
)]
pub async fn toggle_todo_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, TodoError> {
    Ok(Json(state.todo_service.toggle(&id).await?))
}

#[utoipa::path(
    put,
    path = "/todos/{id}",
    params(("id" = String, Path, description = "Todo identifier")),
    request_body = TodoPayload,
    responses(
        (status = 200, description = "Todo with the supplied fields replaced", body = Todo),
        (status = 400, description = "Empty item or malformed body", body = ErrorResponse),
        (status = 404, description = "Unknown or invalid id", body = ErrorResponse)
    )
)]
pub async fn update_todo_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<Json<Todo>, TodoError> {
    // id first, then body, then lookup
    let id = state.todo_service.parse_id(&id)?;
    let payload = json_body(body)?;
    Ok(Json(state.todo_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/todos/{id}",
    params(("id" = String, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "The deleted todo", body = Todo),
        (status = 404, description = "Unknown or invalid id", body = ErrorResponse)
    )
)]
pub async fn delete_todo_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, TodoError> {
    Ok(Json(state.todo_service.delete(&id).await?))
}
