//! Application state for shared services

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::board::BoardRepository;
use crate::domain::comment::CommentRepository;
use crate::infrastructure::user::UserService;

/// Application state containing shared services using dynamic dispatch
///
/// Everything behind the GraphQL schema is injected here; nothing reaches
/// for globals. `pool` is optional so tests can wire in-memory repositories
/// without a database.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub boards: Arc<dyn BoardRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(
        users: Arc<UserService>,
        boards: Arc<dyn BoardRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            users,
            boards,
            comments,
            pool: None,
        }
    }

    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }
}
