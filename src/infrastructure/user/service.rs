//! User service: registration, login and token-based identification
//!
//! This is where the credential codec and the token service meet the user
//! repository. GraphQL resolvers never touch password material directly.

use std::sync::Arc;

use crate::domain::user::{
    validate_email, validate_name, validate_password, User, UserId, UserRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::auth::{PasswordCodec, TokenService};

/// Requested changes to a user profile; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// User service for account management and authentication
#[derive(Debug)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    codec: PasswordCodec,
    tokens: TokenService,
}

impl UserService {
    /// Create a new user service
    pub fn new(
        repository: Arc<dyn UserRepository>,
        codec: PasswordCodec,
        tokens: TokenService,
    ) -> Self {
        Self {
            repository,
            codec,
            tokens,
        }
    }

    /// Register a new account
    ///
    /// The salt is generated here, once, and the password only ever leaves
    /// this function as a derived digest.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(), DomainError> {
        validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_name(name).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(email).await? {
            return Err(DomainError::duplicate_user(email));
        }

        let password_key = self.codec.generate_salt();
        let password_hash = self.codec.derive(password, &password_key);

        let user = User::new(UserId::generate(), email, password_hash, password_key, name);

        self.repository.create(user).await?;
        Ok(())
    }

    /// Authenticate with email and password, returning the user and a fresh
    /// session token. Unknown email and wrong password are indistinguishable.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), DomainError> {
        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self
            .codec
            .verify(password, user.password_key(), user.password_hash())
        {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.pk())?;
        Ok((user, token))
    }

    /// Resolve a bearer token to the acting user
    ///
    /// Token verification failures propagate as-is; a valid token whose
    /// subject no longer exists is `NotFound`.
    pub async fn requester(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.tokens.verify(token)?;
        let pk = claims.subject()?;

        self.repository
            .get(&pk)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))
    }

    /// Update the authenticated user's profile and reissue a token
    ///
    /// A password change re-derives the hash under a freshly generated salt
    /// and persists both.
    pub async fn update(
        &self,
        token: &str,
        request: UpdateUserRequest,
    ) -> Result<(User, String), DomainError> {
        let mut user = self.requester(token).await?;

        if let Some(email) = &request.email {
            validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;

            let taken = self
                .repository
                .get_by_email(email)
                .await?
                .is_some_and(|existing| existing.pk() != user.pk());

            if taken {
                return Err(DomainError::duplicate_user(email));
            }

            user.set_email(email);
        }

        if let Some(name) = &request.name {
            validate_name(name).map_err(|e| DomainError::validation(e.to_string()))?;
            user.set_name(name);
        }

        if let Some(password) = &request.password {
            validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;

            let password_key = self.codec.generate_salt();
            let password_hash = self.codec.derive(password, &password_key);
            user.set_credential(password_hash, password_key);
        }

        let user = self.repository.update(&user).await?;
        let token = self.tokens.issue(user.pk())?;

        Ok((user, token))
    }

    /// Delete the authenticated user's account after re-verifying the
    /// password. The delete is destructive; the password check is the guard.
    pub async fn unregister(&self, token: &str, password: &str) -> Result<bool, DomainError> {
        let user = self.requester(token).await?;

        if !self
            .codec
            .verify(password, user.password_key(), user.password_hash())
        {
            return Err(DomainError::InvalidCredentials);
        }

        self.repository.delete(user.pk()).await
    }

    /// Get a user by primary key
    pub async fn get(&self, pk: &str) -> Result<User, DomainError> {
        let pk = UserId::new(pk).map_err(|e| DomainError::validation(e.to_string()))?;

        self.repository
            .get(&pk)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::auth::{KdfDigest, KdfParams};
    use crate::infrastructure::user::InMemoryUserRepository;

    fn create_service() -> UserService {
        let repository = Arc::new(InMemoryUserRepository::new());
        let codec = PasswordCodec::new(KdfParams::new(10, 32, KdfDigest::Sha512).unwrap());
        let tokens = TokenService::new("test-secret-key-12345").unwrap();
        UserService::new(repository, codec, tokens)
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let service = create_service();

        service.register("a@x.com", "password1", "A").await.unwrap();

        let (user, token) = service.login("a@x.com", "password1").await.unwrap();
        assert_eq!(user.email(), "a@x.com");
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = create_service();

        service.register("a@x.com", "password1", "A").await.unwrap();

        let result = service.register("a@x.com", "password2", "B").await;
        assert!(matches!(result, Err(DomainError::DuplicateUser { .. })));
    }

    #[tokio::test]
    async fn test_register_invalid_input() {
        let service = create_service();

        let result = service.register("not-an-email", "password1", "A").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = service.register("a@x.com", "", "A").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_accepts_short_password() {
        let service = create_service();

        service.register("a@x.com", "p1", "A").await.unwrap();
        service.login("a@x.com", "p1").await.unwrap();
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = create_service();

        service.register("a@x.com", "password1", "A").await.unwrap();

        let result = service.login("a@x.com", "wrong-password").await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_error() {
        let service = create_service();

        let result = service.login("nobody@x.com", "password1").await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_requester_round_trip() {
        let service = create_service();

        service.register("a@x.com", "password1", "A").await.unwrap();
        let (user, token) = service.login("a@x.com", "password1").await.unwrap();

        let acting = service.requester(&token).await.unwrap();
        assert_eq!(acting.pk(), user.pk());
    }

    #[tokio::test]
    async fn test_requester_rejects_garbage() {
        let service = create_service();

        let result = service.requester("garbage").await;
        assert!(matches!(result, Err(DomainError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_requester_deleted_user_is_not_found() {
        let service = create_service();

        service.register("a@x.com", "password1", "A").await.unwrap();
        let (_, token) = service.login("a@x.com", "password1").await.unwrap();

        service.unregister(&token, "password1").await.unwrap();

        let result = service.requester(&token).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_profile_fields() {
        let service = create_service();

        service.register("a@x.com", "password1", "A").await.unwrap();
        let (_, token) = service.login("a@x.com", "password1").await.unwrap();

        let (user, new_token) = service
            .update(
                &token,
                UpdateUserRequest {
                    email: Some("b@x.com".into()),
                    name: Some("B".into()),
                    password: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(user.email(), "b@x.com");
        assert_eq!(user.name(), "B");
        assert!(!new_token.is_empty());

        // Login now works against the new email
        service.login("b@x.com", "password1").await.unwrap();
    }

    #[tokio::test]
    async fn test_password_change_is_persisted_and_rotates_salt() {
        let service = create_service();

        service.register("a@x.com", "password1", "A").await.unwrap();
        let (before, token) = service.login("a@x.com", "password1").await.unwrap();

        let (after, _) = service
            .update(
                &token,
                UpdateUserRequest {
                    password: Some("password2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_ne!(before.password_hash(), after.password_hash());
        assert_ne!(before.password_key(), after.password_key());

        let result = service.login("a@x.com", "password1").await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));

        service.login("a@x.com", "password2").await.unwrap();
    }

    #[tokio::test]
    async fn test_update_to_taken_email() {
        let service = create_service();

        service.register("a@x.com", "password1", "A").await.unwrap();
        service.register("b@x.com", "password1", "B").await.unwrap();
        let (_, token) = service.login("a@x.com", "password1").await.unwrap();

        let result = service
            .update(
                &token,
                UpdateUserRequest {
                    email: Some("b@x.com".into()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::DuplicateUser { .. })));
    }

    #[tokio::test]
    async fn test_unregister_requires_password() {
        let service = create_service();

        service.register("a@x.com", "password1", "A").await.unwrap();
        let (_, token) = service.login("a@x.com", "password1").await.unwrap();

        let result = service.unregister(&token, "wrong-password").await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));

        assert!(service.unregister(&token, "password1").await.unwrap());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_rejects_malformed_pk() {
        let service = create_service();

        let result = service.get("not-a-uuid").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
