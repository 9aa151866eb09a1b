//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::course_handler::{CreateCourseRequest, UpdateCourseRequest};
use common::{HealthResponse, MessageResponse};
use domain::Course;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::course_handler::create_course,
        crate::handlers::course_handler::list_courses,
        crate::handlers::course_handler::get_course,
        crate::handlers::course_handler::update_course,
        crate::handlers::course_handler::delete_course,
    ),
    components(schemas(
        Course,
        CreateCourseRequest,
        UpdateCourseRequest,
        MessageResponse,
        HealthResponse,
    )),
    tags((name = "Courses", description = "Course catalogue"))
)]
pub struct ApiDoc;
