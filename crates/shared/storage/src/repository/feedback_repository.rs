//! Feedback repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::feedback::{self, ActiveModel, Entity as FeedbackEntity};
use common::AppResult;
use domain::{Feedback, NewFeedback};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Feedback repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn create(&self, feedback: NewFeedback) -> AppResult<Feedback>;

    /// Entries for a course, oldest first
    async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<Feedback>>;
}

/// SeaORM-backed feedback repository
pub struct FeedbackStore {
    db: DatabaseConnection,
}

impl FeedbackStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackRepository for FeedbackStore {
    async fn create(&self, feedback: NewFeedback) -> AppResult<Feedback> {
        let active_model = ActiveModel {
            username: Set(feedback.username),
            course_id: Set(feedback.course_id),
            rating: Set(feedback.rating),
            comment: Set(feedback.comment),
            submitted_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Feedback::from(model))
    }

    async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<Feedback>> {
        let models = FeedbackEntity::find()
            .filter(feedback::Column::CourseId.eq(course_id))
            .order_by_asc(feedback::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Feedback::from).collect())
    }
}
