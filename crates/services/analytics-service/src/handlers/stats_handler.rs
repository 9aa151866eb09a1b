//! Statistics handlers.

use axum::{extract::State, response::Json};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use common::{AppResult, ValidatedQuery};
use domain::{
    CourseEnrollmentCount, PopularCourse, DEFAULT_POPULAR_COURSES_LIMIT,
    MAX_POPULAR_COURSES_LIMIT,
};

use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct PopularCoursesQuery {
    /// Number of courses to return (1-100, default 5)
    #[validate(range(
        min = 1,
        max = MAX_POPULAR_COURSES_LIMIT,
        message = "limit must be between 1 and 100"
    ))]
    pub limit: Option<u64>,
}

/// Enrollment count per course
#[utoipa::path(
    get,
    path = "/stats/enrollments",
    tag = "Statistics",
    responses(
        (status = 200, description = "Counts, most enrolled first", body = Vec<CourseEnrollmentCount>)
    )
)]
pub async fn enrollment_counts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CourseEnrollmentCount>>> {
    let counts = state.analytics_service.enrollment_counts().await?;
    Ok(Json(counts))
}

/// Most enrolled courses with their titles
#[utoipa::path(
    get,
    path = "/stats/popular_courses",
    tag = "Statistics",
    params(PopularCoursesQuery),
    responses(
        (status = 200, description = "Top courses", body = Vec<PopularCourse>),
        (status = 400, description = "Invalid limit")
    )
)]
pub async fn popular_courses(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<PopularCoursesQuery>,
) -> AppResult<Json<Vec<PopularCourse>>> {
    let limit = query.limit.unwrap_or(DEFAULT_POPULAR_COURSES_LIMIT);
    let popular = state.analytics_service.popular_courses(limit).await?;
    Ok(Json(popular))
}
