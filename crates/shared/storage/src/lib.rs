//! Persistence layer shared by every service.
//!
//! One database holds the users, courses, enrollments and feedback tables.
//! Each service owns the repositories it needs and talks to its peers over
//! HTTP for anything else.

mod db;
pub mod entities;
mod migrate;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use migrate::{migration_status, run_migrations, MigrateAction};
pub use migrations::Migrator;
pub use repository::{
    CourseRepository, CourseStore, EnrollmentRepository, EnrollmentStore, FeedbackRepository,
    FeedbackStore, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repository::{
    MockCourseRepository, MockEnrollmentRepository, MockFeedbackRepository, MockUserRepository,
};
