//! Course feedback.

use async_trait::async_trait;
use std::sync::Arc;

use common::AppResult;
use domain::{Feedback, NewFeedback};
use storage::FeedbackRepository;

#[async_trait]
pub trait FeedbackService: Send + Sync {
    async fn submit_feedback(&self, feedback: NewFeedback) -> AppResult<Feedback>;

    /// Entries for a course, oldest first. Unknown courses have none.
    async fn list_feedback(&self, course_id: &str) -> AppResult<Vec<Feedback>>;
}

pub struct FeedbackManager {
    repo: Arc<dyn FeedbackRepository>,
}

impl FeedbackManager {
    pub fn new(repo: Arc<dyn FeedbackRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl FeedbackService for FeedbackManager {
    async fn submit_feedback(&self, feedback: NewFeedback) -> AppResult<Feedback> {
        feedback.check_rating()?;

        let feedback = self.repo.create(feedback).await?;
        tracing::info!(
            username = %feedback.username,
            course_id = %feedback.course_id,
            rating = feedback.rating,
            "Feedback submitted"
        );
        Ok(feedback)
    }

    async fn list_feedback(&self, course_id: &str) -> AppResult<Vec<Feedback>> {
        self.repo.list_by_course(course_id).await
    }
}
