//! Enrollment handlers.

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppResult, MessageResponse, ValidatedJson};
use domain::{EnrichedEnrollment, Enrollment};

use crate::state::AppState;

/// Enroll or unenroll request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EnrollRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "john_doe")]
    pub username: String,
    #[validate(length(min = 1, message = "Course id is required"))]
    #[schema(example = "course123")]
    pub course_id: String,
}

/// Move an enrollment to another course
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEnrollmentRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "john_doe")]
    pub username: String,
    #[validate(length(min = 1, message = "Old course id is required"))]
    #[schema(example = "course123")]
    pub old_course_id: String,
    #[validate(length(min = 1, message = "New course id is required"))]
    #[schema(example = "course456")]
    pub new_course_id: String,
}

/// Enroll a user in a course
#[utoipa::path(
    post,
    path = "/enroll",
    tag = "Enrollment",
    request_body = EnrollRequest,
    responses(
        (status = 200, description = "Enrolled", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User does not exist"),
        (status = 503, description = "User service unavailable (when configured)")
    )
)]
pub async fn enroll(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EnrollRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .enrollment_service
        .enroll(Enrollment::new(payload.username, payload.course_id))
        .await?;

    Ok(Json(MessageResponse::new("Enrolled successfully")))
}

/// Courses a user is enrolled in, with titles
#[utoipa::path(
    get,
    path = "/my-courses/{username}",
    tag = "Enrollment",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "One entry per enrollment", body = Vec<EnrichedEnrollment>)
    )
)]
pub async fn my_courses(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<EnrichedEnrollment>>> {
    let enrollments = state.enrollment_service.list_enrollments(&username).await?;
    Ok(Json(enrollments))
}

/// Move an enrollment from one course to another
#[utoipa::path(
    put,
    path = "/enroll",
    tag = "Enrollment",
    request_body = UpdateEnrollmentRequest,
    responses(
        (status = 200, description = "Enrollment updated", body = MessageResponse),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn update_enrollment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateEnrollmentRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .enrollment_service
        .update_enrollment(
            &payload.username,
            &payload.old_course_id,
            &payload.new_course_id,
        )
        .await?;

    Ok(Json(MessageResponse::new("Enrollment updated")))
}

/// Remove an enrollment
#[utoipa::path(
    delete,
    path = "/enroll",
    tag = "Enrollment",
    request_body = EnrollRequest,
    responses(
        (status = 200, description = "Enrollment deleted", body = MessageResponse),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EnrollRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .enrollment_service
        .delete_enrollment(&Enrollment::new(payload.username, payload.course_id))
        .await?;

    Ok(Json(MessageResponse::new("Enrollment deleted")))
}
