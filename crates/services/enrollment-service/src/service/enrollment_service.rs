//! Enrollment orchestration.
//!
//! Enroll validates the user against the User Authority before anything is
//! written. Listing enriches every stored row with its course title from the
//! Course Authority; each lookup is independent, and a failed lookup only
//! degrades its own entry. All remote work of one request shares a single
//! deadline, so a hung authority degrades entries instead of the request.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{info, warn};

use common::{AppError, AppResult};
use domain::{EnrichedEnrollment, Enrollment, TitleLookup};
use storage::EnrollmentRepository;

use crate::clients::{CourseCatalog, UserDirectory, UserLookup};
use crate::config::UnavailablePolicy;

pub const USER_DOES_NOT_EXIST: &str = "User does not exist";
pub const ENROLLMENT_NOT_FOUND: &str = "Enrollment not found";

/// Enrollment workflow trait for dependency injection.
#[async_trait]
pub trait EnrollmentService: Send + Sync {
    /// Enroll a user after confirming the user exists
    async fn enroll(&self, enrollment: Enrollment) -> AppResult<()>;

    /// Stored enrollments of `username` with course titles, in insertion order
    async fn list_enrollments(&self, username: &str) -> AppResult<Vec<EnrichedEnrollment>>;

    /// Move one enrollment to another course
    async fn update_enrollment(
        &self,
        username: &str,
        old_course_id: &str,
        new_course_id: &str,
    ) -> AppResult<()>;

    /// Remove one enrollment
    async fn delete_enrollment(&self, enrollment: &Enrollment) -> AppResult<()>;
}

/// Orchestrator over local persistence and the two authorities.
pub struct EnrollmentManager {
    repo: Arc<dyn EnrollmentRepository>,
    users: Arc<dyn UserDirectory>,
    courses: Arc<dyn CourseCatalog>,
    fanout_concurrency: usize,
    unavailable_policy: UnavailablePolicy,
    lookup_deadline: Duration,
}

impl EnrollmentManager {
    pub fn new(
        repo: Arc<dyn EnrollmentRepository>,
        users: Arc<dyn UserDirectory>,
        courses: Arc<dyn CourseCatalog>,
    ) -> Self {
        Self {
            repo,
            users,
            courses,
            fanout_concurrency: crate::config::DEFAULT_FANOUT_CONCURRENCY,
            unavailable_policy: UnavailablePolicy::default(),
            lookup_deadline: crate::config::lookup_deadline(Duration::from_secs(30)),
        }
    }

    /// Maximum number of course lookups in flight per listing (at least 1)
    pub fn with_fanout_concurrency(mut self, limit: usize) -> Self {
        self.fanout_concurrency = limit.max(1);
        self
    }

    pub fn with_unavailable_policy(mut self, policy: UnavailablePolicy) -> Self {
        self.unavailable_policy = policy;
        self
    }

    pub fn with_lookup_deadline(mut self, deadline: Duration) -> Self {
        self.lookup_deadline = deadline;
        self
    }
}

#[async_trait]
impl EnrollmentService for EnrollmentManager {
    async fn enroll(&self, enrollment: Enrollment) -> AppResult<()> {
        let lookup = timeout(self.lookup_deadline, self.users.lookup_user(&enrollment.username))
            .await
            .unwrap_or_else(|_| UserLookup::Unavailable("lookup deadline elapsed".to_string()));

        match lookup {
            UserLookup::Exists => {}
            UserLookup::Missing => {
                info!(username = %enrollment.username, "Enroll rejected, unknown user");
                return Err(AppError::not_found(USER_DOES_NOT_EXIST));
            }
            UserLookup::Unavailable(reason) => {
                warn!(
                    username = %enrollment.username,
                    %reason,
                    policy = ?self.unavailable_policy,
                    "Enroll rejected, User Authority unavailable"
                );
                return Err(match self.unavailable_policy {
                    UnavailablePolicy::NotFound => AppError::not_found(USER_DOES_NOT_EXIST),
                    UnavailablePolicy::Unavailable => {
                        AppError::upstream_unavailable("user-service")
                    }
                });
            }
        }

        info!(
            username = %enrollment.username,
            course_id = %enrollment.course_id,
            "Enrolled"
        );
        self.repo.insert(enrollment).await
    }

    async fn list_enrollments(&self, username: &str) -> AppResult<Vec<EnrichedEnrollment>> {
        let rows = self.repo.find_by_username(username).await?;
        let courses = &self.courses;
        let deadline = Instant::now() + self.lookup_deadline;

        // `buffered` keeps output in input order
        let enriched = stream::iter(rows)
            .map(|row| async move {
                let lookup = timeout_at(deadline, courses.course_title(&row.course_id))
                    .await
                    .unwrap_or(TitleLookup::Failed);
                if lookup == TitleLookup::Failed {
                    warn!(course_id = %row.course_id, "Course title unavailable");
                }
                EnrichedEnrollment::new(row, lookup)
            })
            .buffered(self.fanout_concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(enriched)
    }

    async fn update_enrollment(
        &self,
        username: &str,
        old_course_id: &str,
        new_course_id: &str,
    ) -> AppResult<()> {
        if !self
            .repo
            .update_one(username, old_course_id, new_course_id)
            .await?
        {
            return Err(AppError::not_found(ENROLLMENT_NOT_FOUND));
        }
        info!(username, old_course_id, new_course_id, "Enrollment updated");
        Ok(())
    }

    async fn delete_enrollment(&self, enrollment: &Enrollment) -> AppResult<()> {
        if !self
            .repo
            .delete_one(&enrollment.username, &enrollment.course_id)
            .await?
        {
            return Err(AppError::not_found(ENROLLMENT_NOT_FOUND));
        }
        info!(
            username = %enrollment.username,
            course_id = %enrollment.course_id,
            "Enrollment deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{MockCourseCatalog, MockUserDirectory};
    use domain::{TITLE_FETCH_ERROR, TITLE_NOT_FOUND};
    use storage::MockEnrollmentRepository;

    fn manager(
        repo: MockEnrollmentRepository,
        users: MockUserDirectory,
        courses: MockCourseCatalog,
    ) -> EnrollmentManager {
        EnrollmentManager::new(Arc::new(repo), Arc::new(users), Arc::new(courses))
    }

    #[tokio::test]
    async fn test_enroll_existing_user_persists() {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_insert()
            .withf(|e| e == &Enrollment::new("alice", "c1"))
            .times(1)
            .returning(|_| Ok(()));
        let mut users = MockUserDirectory::new();
        users.expect_lookup_user().returning(|_| UserLookup::Exists);

        let service = manager(repo, users, MockCourseCatalog::new());
        tokio_test::assert_ok!(service.enroll(Enrollment::new("alice", "c1")).await);
    }

    #[tokio::test]
    async fn test_enroll_missing_user_writes_nothing() {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_insert().never();
        let mut users = MockUserDirectory::new();
        users.expect_lookup_user().returning(|_| UserLookup::Missing);

        let service = manager(repo, users, MockCourseCatalog::new());
        let err = service
            .enroll(Enrollment::new("ghost", "c1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.user_message(), USER_DOES_NOT_EXIST);
    }

    #[tokio::test]
    async fn test_enroll_unavailable_user_defaults_to_not_found() {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_insert().never();
        let mut users = MockUserDirectory::new();
        users
            .expect_lookup_user()
            .returning(|_| UserLookup::Unavailable("status 503".into()));

        let service = manager(repo, users, MockCourseCatalog::new());
        let err = service
            .enroll(Enrollment::new("alice", "c1"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), USER_DOES_NOT_EXIST);
    }

    #[tokio::test]
    async fn test_enroll_unavailable_user_with_unavailable_policy() {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_insert().never();
        let mut users = MockUserDirectory::new();
        users
            .expect_lookup_user()
            .returning(|_| UserLookup::Unavailable("timed out".into()));

        let service = manager(repo, users, MockCourseCatalog::new())
            .with_unavailable_policy(UnavailablePolicy::Unavailable);
        let err = service
            .enroll(Enrollment::new("alice", "c1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_list_preserves_order_and_isolates_failures() {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_find_by_username().returning(|username| {
            Ok(vec![
                Enrollment::new(username, "c1"),
                Enrollment::new(username, "gone"),
                Enrollment::new(username, "flaky"),
                Enrollment::new(username, "c1"),
            ])
        });
        let mut courses = MockCourseCatalog::new();
        courses.expect_course_title().returning(|course_id| match course_id {
            "c1" => TitleLookup::Found("Intro to Rust".into()),
            "gone" => TitleLookup::Missing,
            _ => TitleLookup::Failed,
        });

        let service = manager(repo, MockUserDirectory::new(), courses).with_fanout_concurrency(2);
        let listed = service.list_enrollments("alice").await.unwrap();

        let titles: Vec<_> = listed.iter().map(|e| e.course_title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Intro to Rust", TITLE_NOT_FOUND, TITLE_FETCH_ERROR, "Intro to Rust"]
        );
        assert!(listed.iter().all(|e| e.username == "alice"));
    }

    struct StalledCatalog;

    #[async_trait]
    impl CourseCatalog for StalledCatalog {
        async fn course_title(&self, _course_id: &str) -> TitleLookup {
            std::future::pending().await
        }
    }

    struct StalledDirectory;

    #[async_trait]
    impl UserDirectory for StalledDirectory {
        async fn lookup_user(&self, _username: &str) -> UserLookup {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_list_hung_authority_degrades_within_deadline() {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_find_by_username().returning(|username| {
            Ok((0..20)
                .map(|i| Enrollment::new(username, format!("c{}", i)))
                .collect())
        });

        let service = EnrollmentManager::new(
            Arc::new(repo),
            Arc::new(MockUserDirectory::new()),
            Arc::new(StalledCatalog),
        )
        .with_fanout_concurrency(3)
        .with_lookup_deadline(Duration::from_millis(100));

        let started = std::time::Instant::now();
        let listed = service.list_enrollments("alice").await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(listed.len(), 20);
        assert!(listed.iter().all(|e| e.course_title == TITLE_FETCH_ERROR));
        assert_eq!(listed[19].course_id, "c19");
    }

    #[tokio::test]
    async fn test_enroll_hung_user_authority_follows_policy() {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_insert().never();

        let service = EnrollmentManager::new(
            Arc::new(repo),
            Arc::new(StalledDirectory),
            Arc::new(MockCourseCatalog::new()),
        )
        .with_unavailable_policy(UnavailablePolicy::Unavailable)
        .with_lookup_deadline(Duration::from_millis(50));

        let err = service
            .enroll(Enrollment::new("alice", "c1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_list_empty_makes_no_remote_calls() {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(vec![]));
        let mut courses = MockCourseCatalog::new();
        courses.expect_course_title().never();

        let service = manager(repo, MockUserDirectory::new(), courses);
        assert!(service.list_enrollments("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_no_match_is_not_found() {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_update_one().returning(|_, _, _| Ok(false));

        let service = manager(repo, MockUserDirectory::new(), MockCourseCatalog::new());
        let err = service
            .update_enrollment("alice", "c9", "c2")
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), ENROLLMENT_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_no_match_is_not_found() {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_delete_one().returning(|_, _| Ok(false));

        let service = manager(repo, MockUserDirectory::new(), MockCourseCatalog::new());
        let result = service
            .delete_enrollment(&Enrollment::new("alice", "c1"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
