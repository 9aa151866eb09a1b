//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::AppResult;
use domain::{NewUser, User, UserChanges};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply profile changes; `None` when no such user
    async fn update(&self, username: &str, changes: UserChanges) -> AppResult<Option<User>>;

    /// Delete by username; `false` when nothing was deleted
    async fn delete(&self, username: &str) -> AppResult<bool>;

    /// List all users ordered by username
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// SeaORM-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            username: Set(new_user.username),
            password_hash: Set(new_user.password_hash),
            email: Set(new_user.email),
            name: Set(new_user.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update(&self, username: &str, changes: UserChanges) -> AppResult<Option<User>> {
        let Some(existing) = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        if let Some(email) = changes.email {
            active.email = Set(Some(email));
        }
        if let Some(name) = changes.name {
            active.name = Set(Some(name));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Some(User::from(model)))
    }

    async fn delete(&self, username: &str) -> AppResult<bool> {
        let result = UserEntity::delete_many()
            .filter(user::Column::Username.eq(username))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
