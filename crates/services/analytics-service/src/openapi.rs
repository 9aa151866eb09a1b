//! OpenAPI documentation.

use utoipa::OpenApi;

use common::HealthResponse;
use domain::{CourseEnrollmentCount, PopularCourse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::stats_handler::enrollment_counts,
        crate::handlers::stats_handler::popular_courses,
    ),
    components(schemas(CourseEnrollmentCount, PopularCourse, HealthResponse)),
    tags((name = "Statistics", description = "Enrollment statistics"))
)]
pub struct ApiDoc;
