//! PostgreSQL storage: connection pooling and schema migrations

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::DomainError;

/// Map a sqlx error to the generic storage error, logging the detail
/// server-side. Clients never see the underlying database message.
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::storage("Database error")
}

/// Open a connection pool against the configured database
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.connection_url())
        .await
        .map_err(|e| db_error("Failed to connect to database", e))?;

    info!(
        host = %config.host,
        database = %config.name,
        "Database connection established"
    );

    Ok(pool)
}

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        pk VARCHAR(36) PRIMARY KEY,
        email VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        password_key VARCHAR(255) NOT NULL,
        name VARCHAR(255) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS boards (
        pk BIGSERIAL PRIMARY KEY,
        user_pk VARCHAR(36) NOT NULL REFERENCES users (pk),
        title VARCHAR(20) NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL,
        deleted_at TIMESTAMPTZ
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        pk BIGSERIAL PRIMARY KEY,
        user_pk VARCHAR(36) NOT NULL REFERENCES users (pk),
        board_pk BIGINT NOT NULL REFERENCES boards (pk),
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_boards_user_pk ON boards (user_pk)",
    "CREATE INDEX IF NOT EXISTS idx_comments_board_pk ON comments (board_pk)",
];

/// Create the schema if it does not exist yet
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    for statement in MIGRATIONS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| db_error("Failed to run migration", e))?;
    }

    info!("Database schema is up to date");
    Ok(())
}

/// Cheap connectivity probe used by the readiness endpoint
pub async fn ping(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| db_error("Database ping failed", e))?;

    Ok(())
}
