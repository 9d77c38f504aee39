//! Document-collection todo storage on PostgreSQL.
//!
//! Each todo is one JSONB document in the `todos` table. The database assigns the
//! identifier (`gen_random_uuid()`) on insert, and updates are field-set patches
//! merged into the stored document (`doc || $2`).

use crate::domain::{NewTodo, Todo, TodoError, TodoId, TodoPatch};
use crate::storage::TodoStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Body of a stored document (everything except the identifier).
#[derive(Debug, Serialize, Deserialize)]
struct TodoDocument {
    item: String,
    #[serde(default)]
    completed: bool,
}

/// A todo collection backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Connects, makes sure the collection exists and verifies the server answers.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.ensure_collection().await?;
        store.ping().await?;
        Ok(store)
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_collection(&self) -> anyhow::Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn doc_id(id: TodoId) -> Option<Uuid> {
        match id {
            TodoId::Doc(u) => Some(u),
            TodoId::Seq(_) => None,
        }
    }

    fn decode(row: &PgRow) -> Result<Todo, TodoError> {
        let id: Uuid = row.try_get("id")?;
        let Json(doc): Json<TodoDocument> = row.try_get("doc")?;
        Ok(Todo {
            id: TodoId::Doc(id),
            item: doc.item,
            completed: doc.completed,
        })
    }

    fn patch_document(patch: &TodoPatch) -> JsonValue {
        let mut set = Map::new();
        if let Some(item) = &patch.item {
            set.insert("item".to_string(), JsonValue::from(item.as_str()));
        }
        if let Some(completed) = patch.completed {
            set.insert("completed".to_string(), JsonValue::from(completed));
        }
        JsonValue::Object(set)
    }
}

#[async_trait]
impl TodoStore for PgDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    fn parse_id(&self, raw: &str) -> Result<TodoId, TodoError> {
        Uuid::parse_str(raw).map(TodoId::Doc).map_err(|_| TodoError::InvalidId)
    }

    async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query("SELECT id, doc FROM todos ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::decode).collect()
    }

    async fn insert(&self, new: NewTodo) -> Result<Todo, TodoError> {
        let doc = TodoDocument {
            item: new.item,
            completed: new.completed,
        };
        let row = sqlx::query("INSERT INTO todos (doc) VALUES ($1) RETURNING id, doc")
            .bind(Json(&doc))
            .fetch_one(&self.pool)
            .await?;
        Self::decode(&row)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        let Some(id) = Self::doc_id(id) else { return Ok(None) };
        let row = sqlx::query("SELECT id, doc FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::decode).transpose()
    }

    async fn patch(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, TodoError> {
        let Some(id) = Self::doc_id(id) else { return Ok(None) };
        let set = Self::patch_document(&patch);
        // Single-statement update; a row deleted since the caller's read yields no row.
        let row = sqlx::query("UPDATE todos SET doc = doc || $2 WHERE id = $1 RETURNING id, doc")
            .bind(id)
            .bind(Json(set))
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::decode).transpose()
    }

    async fn remove(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        let Some(id) = Self::doc_id(id) else { return Ok(None) };
        let row = sqlx::query("DELETE FROM todos WHERE id = $1 RETURNING id, doc")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::decode).transpose()
    }

    async fn ping(&self) -> Result<(), TodoError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
