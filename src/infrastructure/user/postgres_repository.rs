//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::db_error;

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "pk, email, password_hash, password_key, name, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, pk: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE pk = $1"
        ))
        .bind(pk.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get user", e))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get user by email", e))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (pk, email, password_hash, password_key, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.pk().as_str())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.password_key())
        .bind(user.name())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::duplicate_user(user.email())
            } else {
                db_error("Failed to create user", e)
            }
        })?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, password_key = $4, name = $5, updated_at = $6
            WHERE pk = $1
            "#,
        )
        .bind(user.pk().as_str())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.password_key())
        .bind(user.name())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::duplicate_user(user.email())
            } else {
                db_error("Failed to update user", e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.pk()
            )));
        }

        Ok(user.clone())
    }

    async fn delete(&self, pk: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE pk = $1")
            .bind(pk.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list users", e))?;

        rows.iter().map(row_to_user).collect()
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let pk: String = row.get("pk");

    let pk = UserId::new(&pk).map_err(|e| {
        tracing::error!(pk = %pk, "Invalid user pk in database: {}", e);
        DomainError::storage("Database error")
    })?;

    Ok(User::restore(
        pk,
        row.get("email"),
        row.get("password_hash"),
        row.get("password_key"),
        row.get("name"),
        row.get("created_at"),
        row.get("updated_at"),
    ))
}
