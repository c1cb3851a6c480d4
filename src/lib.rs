//! GraphQL board/comment API with stateless authentication
//!
//! Layered the usual way: pure domain types and repository traits in
//! `domain`, Postgres/in-memory implementations plus the credential codec
//! and token service in `infrastructure`, the GraphQL schema and router in
//! `api`, and the clap entrypoints in `cli`.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::str::FromStr;
use std::sync::Arc;

use api::AppState;
use config::AppConfig;
use infrastructure::auth::{KdfDigest, KdfParams, PasswordCodec, TokenService};
use infrastructure::board::PostgresBoardRepository;
use infrastructure::comment::PostgresCommentRepository;
use infrastructure::storage;
use infrastructure::user::{PostgresUserRepository, UserService};

/// Wire the application state from configuration: connect to Postgres, run
/// migrations, and build the services over the Postgres repositories.
///
/// Invalid KDF parameters or an empty token secret fail here, before the
/// server binds.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = storage::connect(&config.database).await?;
    storage::run_migrations(&pool).await?;

    let digest = KdfDigest::from_str(&config.auth.kdf.digest)?;
    let params = KdfParams::new(
        config.auth.kdf.iterations,
        config.auth.kdf.key_length as usize,
        digest,
    )?;
    let codec = PasswordCodec::new(params);
    let tokens = TokenService::new(&config.auth.token_secret)?;

    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let boards = Arc::new(PostgresBoardRepository::new(pool.clone()));
    let comments = Arc::new(PostgresCommentRepository::new(pool.clone()));

    let user_service = Arc::new(UserService::new(users, codec, tokens));

    Ok(AppState::new(user_service, boards, comments).with_pool(pool))
}
