//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::feedback_handler::SubmitFeedbackRequest;
use common::{HealthResponse, MessageResponse};
use domain::Feedback;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::feedback_handler::submit_feedback,
        crate::handlers::feedback_handler::list_feedback,
    ),
    components(schemas(Feedback, SubmitFeedbackRequest, MessageResponse, HealthResponse)),
    tags((name = "Feedback", description = "Course feedback"))
)]
pub struct ApiDoc;
