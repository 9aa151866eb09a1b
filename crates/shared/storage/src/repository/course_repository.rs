//! Course repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::course::{self, ActiveModel, Entity as CourseEntity};
use common::AppResult;
use domain::{Course, CourseChanges};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Course repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find(&self, course_id: &str) -> AppResult<Option<Course>>;

    async fn list(&self) -> AppResult<Vec<Course>>;

    async fn create(&self, course: Course) -> AppResult<Course>;

    /// Apply changes; `None` when no such course
    async fn update(&self, course_id: &str, changes: CourseChanges) -> AppResult<Option<Course>>;

    /// `false` when nothing was deleted
    async fn delete(&self, course_id: &str) -> AppResult<bool>;
}

/// SeaORM-backed course repository
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn find(&self, course_id: &str) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(course_id.to_string())
            .one(&self.db)
            .await?;

        Ok(result.map(Course::from))
    }

    async fn list(&self) -> AppResult<Vec<Course>> {
        let models = CourseEntity::find()
            .order_by_asc(course::Column::CourseId)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn create(&self, course: Course) -> AppResult<Course> {
        let active_model = ActiveModel {
            course_id: Set(course.course_id),
            title: Set(course.title),
            description: Set(course.description),
            instructor: Set(course.instructor),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Course::from(model))
    }

    async fn update(&self, course_id: &str, changes: CourseChanges) -> AppResult<Option<Course>> {
        let Some(existing) = CourseEntity::find_by_id(course_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(instructor) = changes.instructor {
            active.instructor = Set(Some(instructor));
        }

        let model = active.update(&self.db).await?;
        Ok(Some(Course::from(model)))
    }

    async fn delete(&self, course_id: &str) -> AppResult<bool> {
        let result = CourseEntity::delete_by_id(course_id.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
