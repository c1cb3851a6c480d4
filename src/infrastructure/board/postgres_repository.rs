//! PostgreSQL board repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::board::{Board, BoardRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::storage::db_error;

/// PostgreSQL implementation of BoardRepository
///
/// Soft-deleted rows are excluded by every read, and every mutating
/// statement carries both the key and the owner in its predicate, so the
/// ownership check is re-applied atomically inside the statement.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: PgPool,
}

impl PostgresBoardRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const BOARD_COLUMNS: &str = "pk, user_pk, title, content, created_at, updated_at, deleted_at";

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn get(&self, pk: i64) -> Result<Option<Board>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE pk = $1 AND deleted_at IS NULL"
        ))
        .bind(pk)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get board", e))?;

        row.map(|r| row_to_board(&r)).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Board>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE deleted_at IS NULL ORDER BY pk"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list boards", e))?;

        rows.iter().map(row_to_board).collect()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Board>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE user_pk = $1 AND deleted_at IS NULL ORDER BY pk"
        ))
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list boards by owner", e))?;

        rows.iter().map(row_to_board).collect()
    }

    async fn create(
        &self,
        owner: &UserId,
        title: &str,
        content: &str,
    ) -> Result<Board, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO boards (user_pk, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING {BOARD_COLUMNS}
            "#
        ))
        .bind(owner.as_str())
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create board", e))?;

        row_to_board(&row)
    }

    async fn update_owned(
        &self,
        pk: i64,
        owner: &UserId,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE boards
            SET title = COALESCE($3, title),
                content = COALESCE($4, content),
                updated_at = NOW()
            WHERE pk = $1 AND user_pk = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(pk)
        .bind(owner.as_str())
        .bind(title)
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update board", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete_owned(&self, pk: i64, owner: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE boards
            SET deleted_at = NOW()
            WHERE pk = $1 AND user_pk = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(pk)
        .bind(owner.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete board", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_board(row: &sqlx::postgres::PgRow) -> Result<Board, DomainError> {
    let user_pk: String = row.get("user_pk");

    let user_pk = UserId::new(&user_pk).map_err(|e| {
        tracing::error!(user_pk = %user_pk, "Invalid board owner in database: {}", e);
        DomainError::storage("Database error")
    })?;

    Ok(Board::restore(
        row.get("pk"),
        user_pk,
        row.get("title"),
        row.get("content"),
        row.get("created_at"),
        row.get("updated_at"),
        row.get("deleted_at"),
    ))
}
