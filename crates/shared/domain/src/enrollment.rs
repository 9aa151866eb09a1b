//! Enrollment entity, its enriched read view and enrollment statistics.

use serde::{Deserialize, Serialize};

use crate::constants::{TITLE_FETCH_ERROR, TITLE_NOT_FOUND};

/// A user's enrollment in a course.
///
/// Identity is the (username, course_id) pair. The store does not enforce
/// uniqueness, so the same pair may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub username: String,
    pub course_id: String,
}

impl Enrollment {
    pub fn new(username: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            course_id: course_id.into(),
        }
    }
}

/// Outcome of resolving one enrollment's course title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleLookup {
    /// The Course Authority returned the course
    Found(String),
    /// The Course Authority definitively does not know the course
    Missing,
    /// The Course Authority could not be reached or answered garbage
    Failed,
}

impl TitleLookup {
    /// Title or status marker shown to the caller
    pub fn into_title(self) -> String {
        match self {
            TitleLookup::Found(title) => title,
            TitleLookup::Missing => TITLE_NOT_FOUND.to_string(),
            TitleLookup::Failed => TITLE_FETCH_ERROR.to_string(),
        }
    }
}

/// Enrollment enriched with its course title (response only, never stored)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EnrichedEnrollment {
    /// Enrolled user
    pub username: String,
    /// Course identifier
    pub course_id: String,
    /// Course title, or a status marker when it could not be resolved
    pub course_title: String,
}

impl EnrichedEnrollment {
    pub fn new(enrollment: Enrollment, lookup: TitleLookup) -> Self {
        Self {
            username: enrollment.username,
            course_id: enrollment.course_id,
            course_title: lookup.into_title(),
        }
    }
}

/// Number of enrollments for one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CourseEnrollmentCount {
    pub course_id: String,
    pub count: u64,
}

/// Entry of the popular courses report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PopularCourse {
    pub course_id: String,
    pub course_title: String,
    pub enrollments: u64,
}

/// Order counts by enrollment count descending, ties by course id ascending.
pub fn rank_by_enrollments(mut counts: Vec<CourseEnrollmentCount>) -> Vec<CourseEnrollmentCount> {
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.course_id.cmp(&b.course_id))
    });
    counts
}
