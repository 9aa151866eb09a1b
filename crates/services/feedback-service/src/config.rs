//! Feedback service configuration.

use common::{DatabaseConfig, ServiceConfig};

/// Default listening port
pub const DEFAULT_PORT: u16 = 5006;

#[derive(Debug, Clone)]
pub struct FeedbackServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
}

impl FeedbackServiceConfig {
    pub fn from_env() -> Self {
        Self {
            service: ServiceConfig::from_env("feedback-service", "FEEDBACK_SERVICE", DEFAULT_PORT),
            database: DatabaseConfig::from_env("FEEDBACK_SERVICE"),
        }
    }
}
