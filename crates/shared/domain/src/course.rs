//! Course catalogue entity.

use serde::{Deserialize, Serialize};

use crate::constants::TITLE_UNKNOWN;

/// Course metadata as owned by the Course Authority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Course {
    /// Catalogue identifier
    pub course_id: String,
    /// Course title
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
}

/// Partial course update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
}

/// The part of a Course Authority payload the enrollment core reads.
///
/// Every field is optional so a payload without a title still decodes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseSummary {
    #[serde(default)]
    pub title: Option<String>,
}

impl CourseSummary {
    /// Title to show, falling back to the unknown marker
    pub fn display_title(self) -> String {
        self.title.unwrap_or_else(|| TITLE_UNKNOWN.to_string())
    }
}
