//! Board repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Board;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository trait for board storage
///
/// Mutating operations are owner-constrained: the owner is part of the
/// predicate of the mutating statement itself, so ownership is re-verified
/// atomically even after the caller has run the authorization gate.
#[async_trait]
pub trait BoardRepository: Send + Sync + Debug {
    /// Get a live (not soft-deleted) board by primary key
    async fn get(&self, pk: i64) -> Result<Option<Board>, DomainError>;

    /// List all live boards
    async fn list_all(&self) -> Result<Vec<Board>, DomainError>;

    /// List live boards owned by the given user
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Board>, DomainError>;

    /// Create a new board
    async fn create(
        &self,
        owner: &UserId,
        title: &str,
        content: &str,
    ) -> Result<Board, DomainError>;

    /// Update a board owned by `owner`. Returns false when no live row
    /// matched both the key and the owner.
    async fn update_owned(
        &self,
        pk: i64,
        owner: &UserId,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<bool, DomainError>;

    /// Soft-delete a board owned by `owner`. Returns false when no live row
    /// matched both the key and the owner.
    async fn soft_delete_owned(&self, pk: i64, owner: &UserId) -> Result<bool, DomainError>;
}
