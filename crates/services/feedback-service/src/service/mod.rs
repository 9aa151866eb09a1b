//! Business logic layer.

mod feedback_service;

pub use feedback_service::{FeedbackManager, FeedbackService};
