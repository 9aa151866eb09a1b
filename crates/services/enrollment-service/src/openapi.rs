//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::enrollment_handler::{EnrollRequest, UpdateEnrollmentRequest};
use common::{HealthResponse, MessageResponse};
use domain::EnrichedEnrollment;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::enrollment_handler::enroll,
        crate::handlers::enrollment_handler::my_courses,
        crate::handlers::enrollment_handler::update_enrollment,
        crate::handlers::enrollment_handler::delete_enrollment,
    ),
    components(schemas(
        EnrollRequest,
        UpdateEnrollmentRequest,
        EnrichedEnrollment,
        MessageResponse,
        HealthResponse,
    )),
    tags((name = "Enrollment", description = "Enrollment workflow"))
)]
pub struct ApiDoc;
