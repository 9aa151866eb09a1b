//! Feedback handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult, MessageResponse, ValidatedJson};
use domain::{Feedback, NewFeedback};

use crate::state::AppState;

const MISSING_FIELDS: &str = "Missing required fields";

/// Feedback submission. Every field is required.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitFeedbackRequest {
    #[validate(required(message = "Missing required fields"))]
    #[schema(example = "john_doe")]
    pub username: Option<String>,
    #[validate(required(message = "Missing required fields"))]
    #[schema(example = "course123")]
    pub course_id: Option<String>,
    #[validate(
        required(message = "Missing required fields"),
        range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5")
    )]
    #[schema(example = 4.5)]
    pub rating: Option<f64>,
    #[validate(required(message = "Missing required fields"))]
    #[schema(example = "Clear explanations")]
    pub comment: Option<String>,
}

impl SubmitFeedbackRequest {
    fn into_new_feedback(self) -> Option<NewFeedback> {
        Some(NewFeedback {
            username: self.username?,
            course_id: self.course_id?,
            rating: self.rating?,
            comment: self.comment?,
        })
    }
}

/// Submit feedback for a course
#[utoipa::path(
    post,
    path = "/feedback",
    tag = "Feedback",
    request_body = SubmitFeedbackRequest,
    responses(
        (status = 201, description = "Feedback submitted", body = MessageResponse),
        (status = 400, description = "Missing required fields")
    )
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SubmitFeedbackRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let feedback = payload
        .into_new_feedback()
        .ok_or_else(|| AppError::validation(MISSING_FIELDS))?;

    state.feedback_service.submit_feedback(feedback).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Feedback submitted successfully")),
    ))
}

/// List feedback for a course
#[utoipa::path(
    get,
    path = "/feedback/{course_id}",
    tag = "Feedback",
    params(("course_id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Feedback entries, oldest first", body = Vec<Feedback>)
    )
)]
pub async fn list_feedback(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<Vec<Feedback>>> {
    let entries = state.feedback_service.list_feedback(&course_id).await?;
    Ok(Json(entries))
}
