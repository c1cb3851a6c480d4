//! Board entity

use chrono::{DateTime, Utc};

use crate::domain::user::UserId;

/// Board entity
///
/// Boards are soft-deleted: `deleted_at` is set instead of removing the row,
/// and deleted boards are invisible to every query.
#[derive(Debug, Clone)]
pub struct Board {
    pk: i64,
    user_pk: UserId,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl Board {
    /// Rebuild a board from stored state
    pub fn restore(
        pk: i64,
        user_pk: UserId,
        title: String,
        content: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            pk,
            user_pk,
            title,
            content,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    pub fn pk(&self) -> i64 {
        self.pk
    }

    pub fn user_pk(&self) -> &UserId {
        &self.user_pk
    }

    pub fn title(&self) -> &str {
        &self.title
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

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

/// Validation for board input
pub mod validation {
    use thiserror::Error;

    pub const MAX_TITLE_LENGTH: usize = 20;

    #[derive(Debug, Error, Clone, PartialEq)]
    pub enum BoardValidationError {
        #[error("Title cannot be empty")]
        EmptyTitle,

        #[error("Title exceeds maximum length of {0} characters")]
        TitleTooLong(usize),

        #[error("Content cannot be empty")]
        EmptyContent,
    }

    pub fn validate_title(title: &str) -> Result<(), BoardValidationError> {
        if title.trim().is_empty() {
            return Err(BoardValidationError::EmptyTitle);
        }

        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(BoardValidationError::TitleTooLong(MAX_TITLE_LENGTH));
        }

        Ok(())
    }

    pub fn validate_content(content: &str) -> Result<(), BoardValidationError> {
        if content.is_empty() {
            return Err(BoardValidationError::EmptyContent);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_restore() {
        let owner = UserId::generate();
        let now = Utc::now();
        let board = Board::restore(
            1,
            owner.clone(),
            "title".into(),
            "content".into(),
            now,
            now,
            None,
        );

        assert_eq!(board.pk(), 1);
        assert_eq!(board.user_pk(), &owner);
        assert!(board.deleted_at().is_none());
    }

    #[test]
    fn test_valid_title() {
        assert!(validate_title("hello").is_ok());
        assert!(validate_title(&"a".repeat(20)).is_ok());
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(validate_title(""), Err(BoardValidationError::EmptyTitle));
        assert_eq!(validate_title("  "), Err(BoardValidationError::EmptyTitle));
    }

    #[test]
    fn test_title_too_long() {
        assert_eq!(
            validate_title(&"a".repeat(21)),
            Err(BoardValidationError::TitleTooLong(20))
        );
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(validate_content(""), Err(BoardValidationError::EmptyContent));
        assert!(validate_content("x").is_ok());
    }
}
