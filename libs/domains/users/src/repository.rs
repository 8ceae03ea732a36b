use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for User persistence
///
/// Mutating operations run their read-check-write sequence atomically, so
/// the duplicate-email rule holds under concurrent writers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user, rejecting duplicate emails (case-insensitive)
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get all users
    async fn get_all(&self) -> UserResult<Vec<User>>;

    /// Merge the update into an existing user, re-checking email uniqueness
    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User>;

    /// Delete a user by ID, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

/// In-memory repository for tests and local experiments
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        let duplicate = users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&input.email));
        if duplicate {
            return Err(UserError::AlreadyExists(input.email));
        }

        let now = chrono::Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());
        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_all(&self) -> UserResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        if let Some(email) = &input.email {
            let duplicate = users
                .values()
                .any(|u| u.id != id && u.email.eq_ignore_ascii_case(email));
            if duplicate {
                return Err(UserError::AlreadyExists(email.clone()));
            }
        }

        let user = users.get_mut(&id).ok_or(UserError::NotFound(id))?;
        user.apply_update(input);
        tracing::info!(user_id = %id, "Updated user");
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let removed = self.users.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(removed)
    }
}
