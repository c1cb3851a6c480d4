//! Comment repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Comment;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository trait for comment storage
///
/// Comments are always addressed within their board, so a comment pk from one
/// board can never resolve against another. Mutations are owner-constrained,
/// matching [`crate::domain::board::BoardRepository`].
#[async_trait]
pub trait CommentRepository: Send + Sync + Debug {
    /// Get a comment by primary key, scoped to a board
    async fn get_in_board(&self, pk: i64, board_pk: i64) -> Result<Option<Comment>, DomainError>;

    /// List comments on a board
    async fn list_by_board(&self, board_pk: i64) -> Result<Vec<Comment>, DomainError>;

    /// Create a new comment
    async fn create(
        &self,
        owner: &UserId,
        board_pk: i64,
        content: &str,
    ) -> Result<Comment, DomainError>;

    /// Update a comment owned by `owner`. Returns false when no row matched
    /// key, board and owner.
    async fn update_owned(
        &self,
        pk: i64,
        board_pk: i64,
        owner: &UserId,
        content: &str,
    ) -> Result<bool, DomainError>;

    /// Delete a comment owned by `owner`. Returns false when no row matched
    /// key, board and owner.
    async fn delete_owned(
        &self,
        pk: i64,
        board_pk: i64,
        owner: &UserId,
    ) -> Result<bool, DomainError>;
}
