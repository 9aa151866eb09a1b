//! Course catalogue management.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{Course, CourseChanges};
use storage::CourseRepository;

const COURSE_NOT_FOUND: &str = "Course not found";

#[async_trait]
pub trait CourseService: Send + Sync {
    async fn add_course(&self, course: Course) -> AppResult<Course>;

    async fn get_course(&self, course_id: &str) -> AppResult<Course>;

    async fn list_courses(&self) -> AppResult<Vec<Course>>;

    async fn update_course(&self, course_id: &str, changes: CourseChanges) -> AppResult<Course>;

    async fn delete_course(&self, course_id: &str) -> AppResult<()>;
}

pub struct CourseManager {
    repo: Arc<dyn CourseRepository>,
}

impl CourseManager {
    pub fn new(repo: Arc<dyn CourseRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CourseService for CourseManager {
    async fn add_course(&self, course: Course) -> AppResult<Course> {
        if self.repo.find(&course.course_id).await?.is_some() {
            return Err(AppError::conflict("Course"));
        }

        let course = self.repo.create(course).await?;
        tracing::info!(course_id = %course.course_id, "Course added");
        Ok(course)
    }

    async fn get_course(&self, course_id: &str) -> AppResult<Course> {
        self.repo
            .find(course_id)
            .await?
            .ok_or_not_found(COURSE_NOT_FOUND)
    }

    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        self.repo.list().await
    }

    async fn update_course(&self, course_id: &str, changes: CourseChanges) -> AppResult<Course> {
        self.repo
            .update(course_id, changes)
            .await?
            .ok_or_not_found(COURSE_NOT_FOUND)
    }

    async fn delete_course(&self, course_id: &str) -> AppResult<()> {
        if !self.repo.delete(course_id).await? {
            return Err(AppError::not_found(COURSE_NOT_FOUND));
        }
        tracing::info!(course_id, "Course deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::MockCourseRepository;

    fn course(course_id: &str) -> Course {
        Course {
            course_id: course_id.to_string(),
            title: "Intro to Rust".to_string(),
            description: None,
            instructor: None,
        }
    }

    #[tokio::test]
    async fn test_add_existing_course_conflicts() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find()
            .returning(|course_id| Ok(Some(course(course_id))));
        repo.expect_create().never();

        let service = CourseManager::new(Arc::new(repo));
        let result = service.add_course(course("c1")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_add_new_course() {
        let mut repo = MockCourseRepository::new();
        repo.expect_find().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(Ok);

        let service = CourseManager::new(Arc::new(repo));
        let added = tokio_test::assert_ok!(service.add_course(course("c1")).await);

        assert_eq!(added.course_id, "c1");
    }

    #[tokio::test]
    async fn test_update_missing_course() {
        let mut repo = MockCourseRepository::new();
        repo.expect_update().returning(|_, _| Ok(None));

        let service = CourseManager::new(Arc::new(repo));
        let err = service
            .update_course("c9", CourseChanges::default())
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), COURSE_NOT_FOUND);
    }
}
