//! Comment queries and mutations

use async_graphql::{Context, ErrorExtensions, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};

use crate::api::state::AppState;
use crate::domain::auth::authorize_owner_action;
use crate::domain::comment::Comment;
use crate::domain::DomainError;

#[derive(SimpleObject, Clone)]
pub struct CommentObject {
    pub pk: i64,
    #[graphql(name = "user_pk")]
    pub user_pk: String,
    #[graphql(name = "board_pk")]
    pub board_pk: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Comment> for CommentObject {
    fn from(comment: &Comment) -> Self {
        Self {
            pk: comment.pk(),
            user_pk: comment.user_pk().as_str().to_string(),
            board_pk: comment.board_pk(),
            content: comment.content().to_string(),
            created_at: comment.created_at(),
            updated_at: comment.updated_at(),
        }
    }
}

fn validate_comment_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::validation("Comment content must not be empty"));
    }
    Ok(())
}

async fn require_board(state: &AppState, board_pk: i64) -> Result<(), DomainError> {
    state
        .boards
        .get(board_pk)
        .await?
        .map(|_| ())
        .ok_or_else(|| DomainError::not_found("Board not found"))
}

async fn load_comment(
    state: &AppState,
    pk: i64,
    board_pk: i64,
) -> Result<Comment, DomainError> {
    state
        .comments
        .get_in_board(pk, board_pk)
        .await?
        .ok_or_else(|| DomainError::not_found("Comment not found"))
}

#[derive(Default)]
pub struct CommentQuery;

#[Object]
impl CommentQuery {
    /// List a board's comments
    async fn comments(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "board_pk")] board_pk: i64,
    ) -> Result<Vec<CommentObject>> {
        let state = ctx.data_unchecked::<AppState>();

        require_board(state, board_pk).await.map_err(|e| e.extend())?;

        let comments = state
            .comments
            .list_by_board(board_pk)
            .await
            .map_err(|e| e.extend())?;

        Ok(comments.iter().map(CommentObject::from).collect())
    }

    /// Create a comment on an existing board
    async fn create_comment(
        &self,
        ctx: &Context<'_>,
        token: String,
        #[graphql(name = "board_pk")] board_pk: i64,
        content: String,
    ) -> Result<bool> {
        let state = ctx.data_unchecked::<AppState>();

        let user = state.users.requester(&token).await.map_err(|e| e.extend())?;

        validate_comment_content(&content).map_err(|e| e.extend())?;
        require_board(state, board_pk).await.map_err(|e| e.extend())?;

        state
            .comments
            .create(user.pk(), board_pk, &content)
            .await
            .map_err(|e| e.extend())?;

        Ok(true)
    }
}

#[derive(Default)]
pub struct CommentMutation;

#[Object]
impl CommentMutation {
    /// Update a comment's content; owner only
    async fn update_comment(
        &self,
        ctx: &Context<'_>,
        token: String,
        #[graphql(name = "board_pk")] board_pk: i64,
        #[graphql(name = "comment_pk")] comment_pk: i64,
        content: String,
    ) -> Result<bool> {
        let state = ctx.data_unchecked::<AppState>();

        let user = state.users.requester(&token).await.map_err(|e| e.extend())?;

        validate_comment_content(&content).map_err(|e| e.extend())?;

        let comment = load_comment(state, comment_pk, board_pk)
            .await
            .map_err(|e| e.extend())?;

        authorize_owner_action(comment.user_pk(), user.pk()).map_err(|e| e.extend())?;

        let updated = state
            .comments
            .update_owned(comment_pk, board_pk, user.pk(), &content)
            .await
            .map_err(|e| e.extend())?;

        if !updated {
            return Err(DomainError::not_found("Comment not found").extend());
        }

        Ok(true)
    }

    /// Delete a comment; owner only
    async fn delete_comment(
        &self,
        ctx: &Context<'_>,
        token: String,
        #[graphql(name = "board_pk")] board_pk: i64,
        #[graphql(name = "comment_pk")] comment_pk: i64,
    ) -> Result<bool> {
        let state = ctx.data_unchecked::<AppState>();

        let user = state.users.requester(&token).await.map_err(|e| e.extend())?;
        let comment = load_comment(state, comment_pk, board_pk)
            .await
            .map_err(|e| e.extend())?;

        authorize_owner_action(comment.user_pk(), user.pk()).map_err(|e| e.extend())?;

        let deleted = state
            .comments
            .delete_owned(comment_pk, board_pk, user.pk())
            .await
            .map_err(|e| e.extend())?;

        if !deleted {
            return Err(DomainError::not_found("Comment not found").extend());
        }

        Ok(true)
    }
}
