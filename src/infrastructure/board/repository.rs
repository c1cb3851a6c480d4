//! In-memory board repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::board::{Board, BoardRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of BoardRepository
#[derive(Debug, Default)]
pub struct InMemoryBoardRepository {
    boards: Arc<RwLock<BTreeMap<i64, Board>>>,
    next_pk: Arc<RwLock<i64>>,
}

impl InMemoryBoardRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_live(board: &Board) -> bool {
    board.deleted_at().is_none()
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn get(&self, pk: i64) -> Result<Option<Board>, DomainError> {
        let boards = self.boards.read().await;
        Ok(boards.get(&pk).filter(|b| is_live(b)).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Board>, DomainError> {
        let boards = self.boards.read().await;
        Ok(boards.values().filter(|b| is_live(b)).cloned().collect())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Board>, DomainError> {
        let boards = self.boards.read().await;

        Ok(boards
            .values()
            .filter(|b| is_live(b) && b.user_pk() == owner)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        owner: &UserId,
        title: &str,
        content: &str,
    ) -> Result<Board, DomainError> {
        let mut boards = self.boards.write().await;
        let mut next_pk = self.next_pk.write().await;

        *next_pk += 1;
        let now = Utc::now();

        let board = Board::restore(
            *next_pk,
            owner.clone(),
            title.to_string(),
            content.to_string(),
            now,
            now,
            None,
        );

        boards.insert(board.pk(), board.clone());
        Ok(board)
    }

    async fn update_owned(
        &self,
        pk: i64,
        owner: &UserId,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<bool, DomainError> {
        let mut boards = self.boards.write().await;

        let Some(board) = boards.get(&pk).filter(|b| is_live(b) && b.user_pk() == owner) else {
            return Ok(false);
        };

        let updated = Board::restore(
            board.pk(),
            board.user_pk().clone(),
            title.unwrap_or(board.title()).to_string(),
            content.unwrap_or(board.content()).to_string(),
            board.created_at(),
            Utc::now(),
            None,
        );

        boards.insert(pk, updated);
        Ok(true)
    }

    async fn soft_delete_owned(&self, pk: i64, owner: &UserId) -> Result<bool, DomainError> {
        let mut boards = self.boards.write().await;

        let Some(board) = boards.get(&pk).filter(|b| is_live(b) && b.user_pk() == owner) else {
            return Ok(false);
        };

        let deleted = Board::restore(
            board.pk(),
            board.user_pk().clone(),
            board.title().to_string(),
            board.content().to_string(),
            board.created_at(),
            board.updated_at(),
            Some(Utc::now()),
        );

        boards.insert(pk, deleted);
        Ok(true)
    }
}
