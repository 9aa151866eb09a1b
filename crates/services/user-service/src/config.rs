//! User service configuration.

use common::{ConfigError, DatabaseConfig, JwtConfig, ServiceConfig};

/// Default listening port
pub const DEFAULT_PORT: u16 = 5001;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            service: ServiceConfig::from_env("user-service", "USER_SERVICE", DEFAULT_PORT),
            database: DatabaseConfig::from_env("USER_SERVICE"),
            jwt: JwtConfig::from_env()?,
        })
    }
}
