//! Comment entity

use chrono::{DateTime, Utc};

use crate::domain::user::UserId;

/// Comment entity, attached to a board
#[derive(Debug, Clone)]
pub struct Comment {
    pk: i64,
    user_pk: UserId,
    board_pk: i64,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Comment {
    /// Rebuild a comment from stored state
    pub fn restore(
        pk: i64,
        user_pk: UserId,
        board_pk: i64,
        content: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pk,
            user_pk,
            board_pk,
            content,
            created_at,
            updated_at,
        }
    }

    pub fn pk(&self) -> i64 {
        self.pk
    }

    pub fn user_pk(&self) -> &UserId {
        &self.user_pk
    }

    pub fn board_pk(&self) -> i64 {
        self.board_pk
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
