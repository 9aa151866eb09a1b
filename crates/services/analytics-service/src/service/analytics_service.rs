//! Enrollment statistics.
//!
//! Reads only local data: the enrollments table for the counts and the
//! courses table for the titles of the top entries.

use async_trait::async_trait;
use std::sync::Arc;

use common::AppResult;
use domain::{rank_by_enrollments, CourseEnrollmentCount, PopularCourse, TITLE_UNKNOWN};
use storage::{CourseRepository, EnrollmentRepository};

#[async_trait]
pub trait AnalyticsService: Send + Sync {
    /// Enrollment count per course, most enrolled first.
    async fn enrollment_counts(&self) -> AppResult<Vec<CourseEnrollmentCount>>;

    /// The `limit` most enrolled courses joined with their titles.
    async fn popular_courses(&self, limit: u64) -> AppResult<Vec<PopularCourse>>;
}

pub struct AnalyticsReporter {
    enrollments: Arc<dyn EnrollmentRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl AnalyticsReporter {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        courses: Arc<dyn CourseRepository>,
    ) -> Self {
        Self {
            enrollments,
            courses,
        }
    }
}

#[async_trait]
impl AnalyticsService for AnalyticsReporter {
    async fn enrollment_counts(&self) -> AppResult<Vec<CourseEnrollmentCount>> {
        let counts = self.enrollments.count_by_course().await?;
        Ok(rank_by_enrollments(counts))
    }

    async fn popular_courses(&self, limit: u64) -> AppResult<Vec<PopularCourse>> {
        let ranked = self.enrollment_counts().await?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        let mut popular = Vec::with_capacity(ranked.len().min(limit));
        for entry in ranked.into_iter().take(limit) {
            let course_title = match self.courses.find(&entry.course_id).await? {
                Some(course) => course.title,
                None => {
                    tracing::debug!(course_id = %entry.course_id, "Popular course has no catalogue entry");
                    TITLE_UNKNOWN.to_string()
                }
            };

            popular.push(PopularCourse {
                course_id: entry.course_id,
                course_title,
                enrollments: entry.count,
            });
        }

        Ok(popular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;
    use domain::Course;
    use storage::{MockCourseRepository, MockEnrollmentRepository};

    fn count(course_id: &str, count: u64) -> CourseEnrollmentCount {
        CourseEnrollmentCount {
            course_id: course_id.to_string(),
            count,
        }
    }

    fn course(course_id: &str, title: &str) -> Course {
        Course {
            course_id: course_id.to_string(),
            title: title.to_string(),
            description: None,
            instructor: None,
        }
    }

    fn reporter(
        enrollments: MockEnrollmentRepository,
        courses: MockCourseRepository,
    ) -> AnalyticsReporter {
        AnalyticsReporter::new(Arc::new(enrollments), Arc::new(courses))
    }

    #[tokio::test]
    async fn test_counts_ranked_by_enrollments() {
        let mut enrollments = MockEnrollmentRepository::new();
        // Grouped counts for [(u1,c1),(u2,c1),(u3,c2)], in storage order
        enrollments
            .expect_count_by_course()
            .returning(|| Ok(vec![count("c2", 1), count("c1", 2)]));

        let service = reporter(enrollments, MockCourseRepository::new());
        let counts = service.enrollment_counts().await.unwrap();

        assert_eq!(counts, vec![count("c1", 2), count("c2", 1)]);
    }

    #[tokio::test]
    async fn test_counts_empty() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_count_by_course().returning(|| Ok(vec![]));

        let service = reporter(enrollments, MockCourseRepository::new());
        assert!(service.enrollment_counts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_popular_courses_fewer_than_limit() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_count_by_course()
            .returning(|| Ok(vec![count("c1", 2), count("gone", 3)]));

        let mut courses = MockCourseRepository::new();
        courses
            .expect_find()
            .withf(|course_id| course_id == "c1")
            .returning(|_| Ok(Some(course("c1", "Intro to Rust"))));
        courses
            .expect_find()
            .withf(|course_id| course_id == "gone")
            .returning(|_| Ok(None));

        let service = reporter(enrollments, courses);
        let popular = tokio_test::assert_ok!(service.popular_courses(5).await);

        assert_eq!(
            popular,
            vec![
                PopularCourse {
                    course_id: "gone".to_string(),
                    course_title: TITLE_UNKNOWN.to_string(),
                    enrollments: 3,
                },
                PopularCourse {
                    course_id: "c1".to_string(),
                    course_title: "Intro to Rust".to_string(),
                    enrollments: 2,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_popular_courses_truncated_before_lookup() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_count_by_course()
            .returning(|| Ok(vec![count("a", 1), count("b", 5), count("c", 3)]));

        let mut courses = MockCourseRepository::new();
        courses
            .expect_find()
            .times(2)
            .returning(|course_id| Ok(Some(course(course_id, course_id))));

        let service = reporter(enrollments, courses);
        let popular = service.popular_courses(2).await.unwrap();

        let ids: Vec<_> = popular.iter().map(|p| p.course_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_count_by_course()
            .returning(|| Err(AppError::internal("connection reset")));

        let service = reporter(enrollments, MockCourseRepository::new());
        let result = service.popular_courses(5).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
