//! Analytics service configuration.

use common::{DatabaseConfig, ServiceConfig};

/// Default listening port
pub const DEFAULT_PORT: u16 = 5005;

#[derive(Debug, Clone)]
pub struct AnalyticsServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
}

impl AnalyticsServiceConfig {
    pub fn from_env() -> Self {
        Self {
            service: ServiceConfig::from_env(
                "analytics-service",
                "ANALYTICS_SERVICE",
                DEFAULT_PORT,
            ),
            database: DatabaseConfig::from_env("ANALYTICS_SERVICE"),
        }
    }
}
