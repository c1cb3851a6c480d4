//! Board queries and mutations

use async_graphql::{Context, ErrorExtensions, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};

use crate::api::state::AppState;
use crate::domain::auth::authorize_owner_action;
use crate::domain::board::{validate_content, validate_title, Board};
use crate::domain::user::User;
use crate::domain::DomainError;

#[derive(SimpleObject, Clone)]
pub struct BoardObject {
    pub pk: i64,
    #[graphql(name = "user_pk")]
    pub user_pk: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Whether the requesting user may edit this board
    pub is_write: bool,
}

impl BoardObject {
    fn from_board(board: &Board, is_write: bool) -> Self {
        Self {
            pk: board.pk(),
            user_pk: board.user_pk().as_str().to_string(),
            title: board.title().to_string(),
            content: board.content().to_string(),
            created_at: board.created_at(),
            updated_at: board.updated_at(),
            is_write,
        }
    }
}

async fn load_board(state: &AppState, board_pk: i64) -> Result<Board, DomainError> {
    state
        .boards
        .get(board_pk)
        .await?
        .ok_or_else(|| DomainError::not_found("Board not found"))
}

/// Resolve the acting user for an optional token. No token means an
/// anonymous read; a present but invalid token is still an error.
async fn optional_requester(
    state: &AppState,
    token: Option<&str>,
) -> Result<Option<User>, DomainError> {
    match token {
        Some(token) => Ok(Some(state.users.requester(token).await?)),
        None => Ok(None),
    }
}

#[derive(Default)]
pub struct BoardQuery;

#[Object]
impl BoardQuery {
    /// Get a single board; `isWrite` reflects whether the token's subject
    /// owns it
    async fn board(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "board_pk")] board_pk: i64,
        token: Option<String>,
    ) -> Result<BoardObject> {
        let state = ctx.data_unchecked::<AppState>();

        // Token problems take precedence over a missing board
        let requester = optional_requester(state, token.as_deref())
            .await
            .map_err(|e| e.extend())?;
        let board = load_board(state, board_pk).await.map_err(|e| e.extend())?;

        let is_write = requester.is_some_and(|user| user.pk() == board.user_pk());

        Ok(BoardObject::from_board(&board, is_write))
    }

    /// List the authenticated user's boards
    async fn my_boards(&self, ctx: &Context<'_>, token: String) -> Result<Vec<BoardObject>> {
        let state = ctx.data_unchecked::<AppState>();

        let user = state.users.requester(&token).await.map_err(|e| e.extend())?;
        let boards = state
            .boards
            .list_by_owner(user.pk())
            .await
            .map_err(|e| e.extend())?;

        Ok(boards
            .iter()
            .map(|board| BoardObject::from_board(board, true))
            .collect())
    }

    /// List every live board
    async fn all_boards(&self, ctx: &Context<'_>) -> Result<Vec<BoardObject>> {
        let state = ctx.data_unchecked::<AppState>();

        let boards = state.boards.list_all().await.map_err(|e| e.extend())?;

        Ok(boards
            .iter()
            .map(|board| BoardObject::from_board(board, false))
            .collect())
    }

    /// Create a board owned by the token's subject
    async fn create_board(
        &self,
        ctx: &Context<'_>,
        token: String,
        title: String,
        content: String,
    ) -> Result<bool> {
        let state = ctx.data_unchecked::<AppState>();

        let user = state.users.requester(&token).await.map_err(|e| e.extend())?;

        validate_title(&title)
            .map_err(|e| DomainError::validation(e.to_string()).extend())?;
        validate_content(&content)
            .map_err(|e| DomainError::validation(e.to_string()).extend())?;

        state
            .boards
            .create(user.pk(), &title, &content)
            .await
            .map_err(|e| e.extend())?;

        Ok(true)
    }
}

#[derive(Default)]
pub struct BoardMutation;

#[Object]
impl BoardMutation {
    /// Update a board's title and/or content; owner only
    async fn update_board(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "board_pk")] board_pk: i64,
        title: Option<String>,
        content: Option<String>,
        token: String,
    ) -> Result<bool> {
        let state = ctx.data_unchecked::<AppState>();

        let user = state.users.requester(&token).await.map_err(|e| e.extend())?;

        if let Some(title) = &title {
            validate_title(title).map_err(|e| DomainError::validation(e.to_string()).extend())?;
        }
        if let Some(content) = &content {
            validate_content(content)
                .map_err(|e| DomainError::validation(e.to_string()).extend())?;
        }

        let board = load_board(state, board_pk).await.map_err(|e| e.extend())?;

        authorize_owner_action(board.user_pk(), user.pk()).map_err(|e| e.extend())?;

        // Ownership is re-checked inside the statement itself
        let updated = state
            .boards
            .update_owned(board_pk, user.pk(), title.as_deref(), content.as_deref())
            .await
            .map_err(|e| e.extend())?;

        if !updated {
            return Err(DomainError::not_found("Board not found").extend());
        }

        Ok(true)
    }

    /// Soft-delete a board; owner only
    async fn delete_board(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "board_pk")] board_pk: i64,
        token: String,
    ) -> Result<bool> {
        let state = ctx.data_unchecked::<AppState>();

        let user = state.users.requester(&token).await.map_err(|e| e.extend())?;
        let board = load_board(state, board_pk).await.map_err(|e| e.extend())?;

        authorize_owner_action(board.user_pk(), user.pk()).map_err(|e| e.extend())?;

        let deleted = state
            .boards
            .soft_delete_owned(board_pk, user.pk())
            .await
            .map_err(|e| e.extend())?;

        if !deleted {
            return Err(DomainError::not_found("Board not found").extend());
        }

        Ok(true)
    }
}
