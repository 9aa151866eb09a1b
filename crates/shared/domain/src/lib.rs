//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared across the platform services.

pub mod constants;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod feedback;
pub mod password;
pub mod user;

pub use constants::*;
pub use course::{Course, CourseChanges, CourseSummary};
pub use enrollment::{
    rank_by_enrollments, CourseEnrollmentCount, EnrichedEnrollment, Enrollment, PopularCourse,
    TitleLookup,
};
pub use error::{DomainError, DomainResult};
pub use feedback::{Feedback, NewFeedback};
pub use password::Password;
pub use user::{NewUser, User, UserChanges, UserResponse};
