//! # Postgres thread store
//!
//! Maps the thread aggregate onto a single `threads` table. The whole
//! aggregate (replies included) lives in the JSONB `document` column; `board`
//! and `bumped_on` are duplicated into indexed columns for listing.

use async_trait::async_trait;
use domains::{AppError, Result, Thread, ThreadRepository};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::Row;
use tracing::{error, info};
use uuid::Uuid;

pub struct PgThreadRepository {
    pool: PgPool,
}

fn storage_error(err: sqlx::Error) -> AppError {
    error!(error = %err, "postgres query failed");
    AppError::Storage(err.to_string())
}

impl PgThreadRepository {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(storage_error)?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations in `migrations/`.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Storage(format!("migration failed: {e}")))?;
        info!("database migrations applied");
        Ok(())
    }

    fn decode(row: &sqlx::postgres::PgRow) -> Result<Thread> {
        let Json(thread) = row
            .try_get::<Json<Thread>, _>("document")
            .map_err(storage_error)?;
        Ok(thread)
    }
}

#[async_trait]
impl ThreadRepository for PgThreadRepository {
    async fn insert(&self, thread: &Thread) -> Result<()> {
        sqlx::query("INSERT INTO threads (id, board, bumped_on, document) VALUES ($1, $2, $3, $4)")
            .bind(thread.id)
            .bind(&thread.board)
            .bind(thread.bumped_on)
            .bind(Json(thread))
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Thread>> {
        let row = sqlx::query("SELECT document FROM threads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn list_recent(&self, board: &str, limit: usize) -> Result<Vec<Thread>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        sqlx::query(
            "SELECT document FROM threads WHERE board = $1 ORDER BY bumped_on DESC, id LIMIT $2",
        )
        .bind(board)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?
        .iter()
        .map(Self::decode)
        .collect()
    }

    async fn save(&self, thread: &Thread) -> Result<()> {
        let result = sqlx::query(
            "UPDATE threads SET board = $2, bumped_on = $3, document = $4 WHERE id = $1",
        )
        .bind(thread.id)
        .bind(&thread.board)
        .bind(thread.bumped_on)
        .bind(Json(thread))
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::thread_not_found(thread.id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM threads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected() > 0)
    }
}
