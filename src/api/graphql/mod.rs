//! GraphQL schema: roots, object types and error surfacing
//!
//! The schema is built over [`AppState`], so everything the resolvers touch
//! arrives through dependency injection. Domain errors cross into GraphQL
//! responses with a machine-readable `code` extension.

mod board;
mod comment;
mod user;

use async_graphql::{EmptySubscription, ErrorExtensions, MergedObject, Schema};

use crate::domain::DomainError;

use super::state::AppState;

pub use board::{BoardMutation, BoardObject, BoardQuery};
pub use comment::{CommentMutation, CommentObject, CommentQuery};
pub use user::{UserMutation, UserObject, UserQuery, UserWithToken};

#[derive(MergedObject, Default)]
pub struct QueryRoot(UserQuery, BoardQuery, CommentQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(UserMutation, BoardMutation, CommentMutation);

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema over the given application state
pub fn build_schema(state: AppState) -> ApiSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(state)
    .finish()
}

impl ErrorExtensions for DomainError {
    fn extend(&self) -> async_graphql::Error {
        // Storage details stay in the server logs
        let message = match self {
            DomainError::Storage { .. } => "Database error".to_string(),
            other => other.to_string(),
        };

        async_graphql::Error::new(message).extend_with(|_, e| e.set("code", self.code()))
    }
}
