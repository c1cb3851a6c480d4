//! PostgreSQL comment repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::comment::{Comment, CommentRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::storage::db_error;

/// PostgreSQL implementation of CommentRepository
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COMMENT_COLUMNS: &str = "pk, user_pk, board_pk, content, created_at, updated_at";

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn get_in_board(&self, pk: i64, board_pk: i64) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE pk = $1 AND board_pk = $2"
        ))
        .bind(pk)
        .bind(board_pk)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get comment", e))?;

        row.map(|r| row_to_comment(&r)).transpose()
    }

    async fn list_by_board(&self, board_pk: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE board_pk = $1 ORDER BY pk"
        ))
        .bind(board_pk)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list comments", e))?;

        rows.iter().map(row_to_comment).collect()
    }

    async fn create(
        &self,
        owner: &UserId,
        board_pk: i64,
        content: &str,
    ) -> Result<Comment, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO comments (user_pk, board_pk, content, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(owner.as_str())
        .bind(board_pk)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create comment", e))?;

        row_to_comment(&row)
    }

    async fn update_owned(
        &self,
        pk: i64,
        board_pk: i64,
        owner: &UserId,
        content: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET content = $4, updated_at = NOW()
            WHERE pk = $1 AND board_pk = $2 AND user_pk = $3
            "#,
        )
        .bind(pk)
        .bind(board_pk)
        .bind(owner.as_str())
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update comment", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_owned(
        &self,
        pk: i64,
        board_pk: i64,
        owner: &UserId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM comments WHERE pk = $1 AND board_pk = $2 AND user_pk = $3",
        )
        .bind(pk)
        .bind(board_pk)
        .bind(owner.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete comment", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_comment(row: &sqlx::postgres::PgRow) -> Result<Comment, DomainError> {
    let user_pk: String = row.get("user_pk");

    let user_pk = UserId::new(&user_pk).map_err(|e| {
        tracing::error!(user_pk = %user_pk, "Invalid comment owner in database: {}", e);
        DomainError::storage("Database error")
    })?;

    Ok(Comment::restore(
        row.get("pk"),
        user_pk,
        row.get("board_pk"),
        row.get("content"),
        row.get("created_at"),
        row.get("updated_at"),
    ))
}
