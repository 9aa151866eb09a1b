//! User service - profile reads and account management.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, OptionExt};
use domain::{User, UserChanges};
use storage::UserRepository;

const USER_NOT_FOUND: &str = "User not found";

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by username
    async fn get_user(&self, username: &str) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Update profile fields
    async fn update_user(&self, username: &str, changes: UserChanges) -> AppResult<User>;

    /// Delete the account
    async fn delete_user(&self, username: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, username: &str) -> AppResult<User> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or_not_found(USER_NOT_FOUND)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn update_user(&self, username: &str, changes: UserChanges) -> AppResult<User> {
        if changes.is_empty() {
            // Nothing to write, but the user must still exist
            return self.get_user(username).await;
        }

        self.repo
            .update(username, changes)
            .await?
            .ok_or_not_found(USER_NOT_FOUND)
    }

    async fn delete_user(&self, username: &str) -> AppResult<()> {
        if !self.repo.delete(username).await? {
            return Err(common::AppError::not_found(USER_NOT_FOUND));
        }
        tracing::info!(username, "User deleted");
        Ok(())
    }
}
