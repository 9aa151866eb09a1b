//! Course catalogue handlers.
//!
//! `GET /courses/{course_id}` is the Course Authority lookup used by the
//! enrollment service.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppResult, MessageResponse, ValidatedJson};
use domain::{Course, CourseChanges};

use crate::state::AppState;

/// New course request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "Course id is required"))]
    #[schema(example = "rust-101")]
    pub course_id: String,
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Intro to Rust")]
    pub title: String,
    pub description: Option<String>,
    pub instructor: Option<String>,
}

/// Partial course update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
}

/// Add a course
#[utoipa::path(
    post,
    path = "/courses",
    tag = "Courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course added", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Course id already taken")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .course_service
        .add_course(Course {
            course_id: payload.course_id,
            title: payload.title,
            description: payload.description,
            instructor: payload.instructor,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Course added"))))
}

/// List all courses
#[utoipa::path(
    get,
    path = "/courses",
    tag = "Courses",
    responses((status = 200, description = "All courses", body = Vec<Course>))
)]
pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Vec<Course>>> {
    Ok(Json(state.course_service.list_courses().await?))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/courses/{course_id}",
    tag = "Courses",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<Course>> {
    Ok(Json(state.course_service.get_course(&course_id).await?))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/courses/{course_id}",
    tag = "Courses",
    params(("course_id" = String, Path, description = "Course id")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = MessageResponse),
        (status = 404, description = "Course not found")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateCourseRequest>,
) -> AppResult<Json<MessageResponse>> {
    let changes = CourseChanges {
        title: payload.title,
        description: payload.description,
        instructor: payload.instructor,
    };
    state.course_service.update_course(&course_id, changes).await?;

    Ok(Json(MessageResponse::new("Course updated")))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/courses/{course_id}",
    tag = "Courses",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 404, description = "Course not found")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.course_service.delete_course(&course_id).await?;
    Ok(Json(MessageResponse::new("Course deleted")))
}
