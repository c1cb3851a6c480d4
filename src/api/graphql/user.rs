//! User queries and mutations

use async_graphql::{Context, ErrorExtensions, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};

use crate::api::state::AppState;
use crate::domain::user::User;
use crate::infrastructure::user::UpdateUserRequest;

/// User as exposed through the schema; credential material never leaves the
/// service layer.
#[derive(SimpleObject, Clone)]
pub struct UserObject {
    pub pk: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserObject {
    fn from(user: &User) -> Self {
        Self {
            pk: user.pk().as_str().to_string(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Login/update result: the user plus a fresh session token
#[derive(SimpleObject)]
pub struct UserWithToken {
    pub user: UserObject,
    pub token: String,
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Get a single user by primary key
    async fn user(&self, ctx: &Context<'_>, pk: String) -> Result<UserObject> {
        let state = ctx.data_unchecked::<AppState>();

        let user = state.users.get(&pk).await.map_err(|e| e.extend())?;
        Ok(UserObject::from(&user))
    }

    /// List all registered users
    async fn all_users(&self, ctx: &Context<'_>) -> Result<Vec<UserObject>> {
        let state = ctx.data_unchecked::<AppState>();

        let users = state.users.list().await.map_err(|e| e.extend())?;
        Ok(users.iter().map(UserObject::from).collect())
    }

    /// Register a new account
    async fn register(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        name: String,
    ) -> Result<bool> {
        let state = ctx.data_unchecked::<AppState>();

        state
            .users
            .register(&email, &password, &name)
            .await
            .map_err(|e| e.extend())?;

        Ok(true)
    }

    /// Authenticate and receive a session token
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<UserWithToken> {
        let state = ctx.data_unchecked::<AppState>();

        let (user, token) = state
            .users
            .login(&email, &password)
            .await
            .map_err(|e| e.extend())?;

        Ok(UserWithToken {
            user: UserObject::from(&user),
            token,
        })
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Update the authenticated user's profile; returns the user and a
    /// reissued token
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        token: String,
        email: Option<String>,
        name: Option<String>,
        password: Option<String>,
    ) -> Result<UserWithToken> {
        let state = ctx.data_unchecked::<AppState>();

        let (user, token) = state
            .users
            .update(
                &token,
                UpdateUserRequest {
                    email,
                    name,
                    password,
                },
            )
            .await
            .map_err(|e| e.extend())?;

        Ok(UserWithToken {
            user: UserObject::from(&user),
            token,
        })
    }

    /// Delete the authenticated user's account; the password is re-verified
    async fn un_register(
        &self,
        ctx: &Context<'_>,
        token: String,
        password: String,
    ) -> Result<bool> {
        let state = ctx.data_unchecked::<AppState>();

        state
            .users
            .unregister(&token, &password)
            .await
            .map_err(|e| e.extend())
    }
}
