use crate::domain::{Todo, TodoPayload};
use crate::transport::http::handlers::{health, todos};
use crate::transport::http::types::{AppState, ErrorResponse, HealthResponse};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        todos::list_todos_handler,
        todos::create_todo_handler,
        todos::get_todo_handler,
        todos::toggle_todo_handler,
        todos::update_todo_handler,
        todos::delete_todo_handler
    ),
    components(schemas(Todo, TodoPayload, ErrorResponse, HealthResponse))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/todos",
            get(todos::list_todos_handler).post(todos::create_todo_handler),
        )
        .route(
            "/todos/:id",
            get(todos::get_todo_handler)
                .patch(todos::toggle_todo_handler)
                .put(todos::update_todo_handler)
                .delete(todos::delete_todo_handler),
        )
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::todo_service::TodoService;
    use crate::storage::MemoryStore;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value as JsonValue};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let service = TodoService::new(Arc::new(MemoryStore::new()));
        create_router(AppState::new(service))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(b) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(b.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn list_is_empty_array_not_null() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/todos", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn create_validates_item() {
        let app = app();

        let (status, body) = send(&app, Method::POST, "/todos", Some(r#"{"completed":true}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Item is required"}));

        let (status, body) = send(&app, Method::POST, "/todos", Some(r#"{"item":"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "invalid data"}));

        let (_, body) = send(&app, Method::GET, "/todos", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn create_returns_201_with_assigned_id() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/todos", Some(r#"{"item":"a"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"id": 1, "item": "a", "completed": false}));

        let (_, body) = send(&app, Method::POST, "/todos", Some(r#"{"item":"b","completed":true}"#)).await;
        assert_eq!(body, json!({"id": 2, "item": "b", "completed": true}));
    }

    #[tokio::test]
    async fn invalid_and_unknown_ids_are_404() {
        let app = app();
        for method in [Method::GET, Method::PATCH, Method::DELETE] {
            let (status, body) = send(&app, method.clone(), "/todos/abc", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, json!({"error": "invalid todo id"}));

            let (status, body) = send(&app, method, "/todos/42", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, json!({"error": "todo not found"}));
        }

        let (status, _) = send(&app, Method::PUT, "/todos/abc", Some(r#"{"item":"x"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::PUT, "/todos/42", Some(r#"{"item":"x"}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn put_with_malformed_body_is_400() {
        let app = app();
        send(&app, Method::POST, "/todos", Some(r#"{"item":"a"}"#)).await;

        let (status, body) = send(&app, Method::PUT, "/todos/1", Some("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "invalid data"}));

        let (status, _) = send(&app, Method::PUT, "/todos/1", Some(r#"{"item":""}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn full_lifecycle() {
        let app = app();

        let (status, created) = send(&app, Method::POST, "/todos", Some(r#"{"item":"buy milk"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["completed"], json!(false));
        let uri = format!("/todos/{}", created["id"]);

        let (status, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (_, toggled) = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(toggled["completed"], json!(true));
        let (_, toggled) = send(&app, Method::PATCH, &uri, None).await;
        assert_eq!(toggled["completed"], json!(false));

        let (status, updated) = send(
            &app,
            Method::PUT,
            &uri,
            Some(r#"{"item":"buy oat milk","completed":true}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated, json!({"id": created["id"], "item": "buy oat milk", "completed": true}));

        let (status, deleted) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, updated);

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_backend() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "backend": "memory"}));
    }

    #[test]
    fn openapi_lists_todo_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/todos"));
        assert!(doc.paths.paths.contains_key("/todos/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
