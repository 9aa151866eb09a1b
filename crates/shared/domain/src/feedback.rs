//! Course feedback entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RATING, MIN_RATING};
use crate::error::{DomainError, DomainResult};

/// Feedback left by a user for a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Feedback {
    pub username: String,
    pub course_id: String,
    pub rating: f64,
    pub comment: String,
    pub submitted_at: DateTime<Utc>,
}

/// Feedback submission data
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub username: String,
    pub course_id: String,
    pub rating: f64,
    pub comment: String,
}

impl NewFeedback {
    /// Reject ratings outside the accepted scale.
    pub fn check_rating(&self) -> DomainResult<()> {
        if (MIN_RATING..=MAX_RATING).contains(&self.rating) {
            Ok(())
        } else {
            Err(DomainError::RatingOutOfRange(self.rating))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(rating: f64) -> NewFeedback {
        NewFeedback {
            username: "alice".to_string(),
            course_id: "c1".to_string(),
            rating,
            comment: String::new(),
        }
    }

    #[test]
    fn test_rating_bounds_inclusive() {
        assert!(rated(MIN_RATING).check_rating().is_ok());
        assert!(rated(MAX_RATING).check_rating().is_ok());
        assert_eq!(
            rated(5.5).check_rating(),
            Err(DomainError::RatingOutOfRange(5.5))
        );
    }
}
