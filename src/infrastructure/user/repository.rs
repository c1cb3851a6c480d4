//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, pk: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(pk.as_str()).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email() == user.email()) {
            return Err(DomainError::duplicate_user(user.email()));
        }

        users.insert(user.pk().as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let pk = user.pk().as_str().to_string();

        if !users.contains_key(&pk) {
            return Err(DomainError::not_found(format!("User '{}' not found", pk)));
        }

        let email_taken = users
            .values()
            .any(|u| u.email() == user.email() && u.pk() != user.pk());

        if email_taken {
            return Err(DomainError::duplicate_user(user.email()));
        }

        users.insert(pk, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, pk: &UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(pk.as_str()).is_some())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at());

        Ok(all)
    }
}
