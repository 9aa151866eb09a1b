//! Enrollment repository implementation.
//!
//! Update and delete act on a single row: the oldest one matching the
//! (username, course_id) pair. Duplicates are allowed, so other matching
//! rows are left in place.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::enrollment::{self, ActiveModel, Entity as EnrollmentEntity};
use common::AppResult;
use domain::{CourseEnrollmentCount, Enrollment};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Enrollment repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Insert a new row (no de-duplication)
    async fn insert(&self, enrollment: Enrollment) -> AppResult<()>;

    /// Rows for `username` in insertion order
    async fn find_by_username(&self, username: &str) -> AppResult<Vec<Enrollment>>;

    /// Replace the course of one row matching (username, old_course_id)
    async fn update_one(
        &self,
        username: &str,
        old_course_id: &str,
        new_course_id: &str,
    ) -> AppResult<bool>;

    /// Delete one row matching (username, course_id)
    async fn delete_one(&self, username: &str, course_id: &str) -> AppResult<bool>;

    /// Number of rows per course, unordered
    async fn count_by_course(&self) -> AppResult<Vec<CourseEnrollmentCount>>;
}

#[derive(Debug, FromQueryResult)]
struct CourseCountRow {
    course_id: String,
    count: i64,
}

/// SeaORM-backed enrollment repository
pub struct EnrollmentStore {
    db: DatabaseConnection,
}

impl EnrollmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn first_match(
        &self,
        username: &str,
        course_id: &str,
    ) -> AppResult<Option<enrollment::Model>> {
        let model = EnrollmentEntity::find()
            .filter(enrollment::Column::Username.eq(username))
            .filter(enrollment::Column::CourseId.eq(course_id))
            .order_by_asc(enrollment::Column::Id)
            .one(&self.db)
            .await?;

        Ok(model)
    }
}

#[async_trait]
impl EnrollmentRepository for EnrollmentStore {
    async fn insert(&self, enrollment: Enrollment) -> AppResult<()> {
        let active_model = ActiveModel {
            username: Set(enrollment.username),
            course_id: Set(enrollment.course_id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        active_model.insert(&self.db).await?;
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Vec<Enrollment>> {
        let models = EnrollmentEntity::find()
            .filter(enrollment::Column::Username.eq(username))
            .order_by_asc(enrollment::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Enrollment::from).collect())
    }

    async fn update_one(
        &self,
        username: &str,
        old_course_id: &str,
        new_course_id: &str,
    ) -> AppResult<bool> {
        let Some(existing) = self.first_match(username, old_course_id).await? else {
            return Ok(false);
        };

        let mut active: ActiveModel = existing.into();
        active.course_id = Set(new_course_id.to_string());
        active.update(&self.db).await?;

        Ok(true)
    }

    async fn delete_one(&self, username: &str, course_id: &str) -> AppResult<bool> {
        let Some(existing) = self.first_match(username, course_id).await? else {
            return Ok(false);
        };

        let result = EnrollmentEntity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn count_by_course(&self) -> AppResult<Vec<CourseEnrollmentCount>> {
        let rows = EnrollmentEntity::find()
            .select_only()
            .column(enrollment::Column::CourseId)
            .column_as(Expr::col(enrollment::Column::Id).count(), "count")
            .group_by(enrollment::Column::CourseId)
            .into_model::<CourseCountRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CourseEnrollmentCount {
                course_id: row.course_id,
                count: row.count.max(0) as u64,
            })
            .collect())
    }
}
