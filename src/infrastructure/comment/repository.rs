//! In-memory comment repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::comment::{Comment, CommentRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of CommentRepository
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<BTreeMap<i64, Comment>>>,
    next_pk: Arc<RwLock<i64>>,
}

impl InMemoryCommentRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn get_in_board(&self, pk: i64, board_pk: i64) -> Result<Option<Comment>, DomainError> {
        let comments = self.comments.read().await;
        Ok(comments
            .get(&pk)
            .filter(|c| c.board_pk() == board_pk)
            .cloned())
    }

    async fn list_by_board(&self, board_pk: i64) -> Result<Vec<Comment>, DomainError> {
        let comments = self.comments.read().await;

        Ok(comments
            .values()
            .filter(|c| c.board_pk() == board_pk)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        owner: &UserId,
        board_pk: i64,
        content: &str,
    ) -> Result<Comment, DomainError> {
        let mut comments = self.comments.write().await;
        let mut next_pk = self.next_pk.write().await;

        *next_pk += 1;
        let now = Utc::now();

        let comment = Comment::restore(
            *next_pk,
            owner.clone(),
            board_pk,
            content.to_string(),
            now,
            now,
        );

        comments.insert(comment.pk(), comment.clone());
        Ok(comment)
    }

    async fn update_owned(
        &self,
        pk: i64,
        board_pk: i64,
        owner: &UserId,
        content: &str,
    ) -> Result<bool, DomainError> {
        let mut comments = self.comments.write().await;

        let Some(comment) = comments
            .get(&pk)
            .filter(|c| c.board_pk() == board_pk && c.user_pk() == owner)
        else {
            return Ok(false);
        };

        let updated = Comment::restore(
            comment.pk(),
            comment.user_pk().clone(),
            comment.board_pk(),
            content.to_string(),
            comment.created_at(),
            Utc::now(),
        );

        comments.insert(pk, updated);
        Ok(true)
    }

    async fn delete_owned(
        &self,
        pk: i64,
        board_pk: i64,
        owner: &UserId,
    ) -> Result<bool, DomainError> {
        let mut comments = self.comments.write().await;

        let matches = comments
            .get(&pk)
            .is_some_and(|c| c.board_pk() == board_pk && c.user_pk() == owner);

        if !matches {
            return Ok(false);
        }

        comments.remove(&pk);
        Ok(true)
    }
}
