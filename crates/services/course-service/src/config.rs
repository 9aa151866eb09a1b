//! Course service configuration.

use common::{DatabaseConfig, ServiceConfig};

/// Default listening port
pub const DEFAULT_PORT: u16 = 5002;

#[derive(Debug, Clone)]
pub struct CourseServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
}

impl CourseServiceConfig {
    pub fn from_env() -> Self {
        Self {
            service: ServiceConfig::from_env("course-service", "COURSE_SERVICE", DEFAULT_PORT),
            database: DatabaseConfig::from_env("COURSE_SERVICE"),
        }
    }
}
