//! Enrollment service configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use common::{env_or, ConfigError, DatabaseConfig, RetryConfig, ServiceConfig};

/// Default listening port
pub const DEFAULT_PORT: u16 = 5003;

/// Default number of concurrent course lookups per listing
pub const DEFAULT_FANOUT_CONCURRENCY: usize = 8;

/// Remote lookups get three quarters of the request deadline.
pub fn lookup_deadline(request_timeout: Duration) -> Duration {
    request_timeout * 3 / 4
}

/// Shorten `requested` so one remote call always ends inside `budget`.
pub fn fit_retry_policy(requested: RetryConfig, budget: Duration) -> RetryConfig {
    let fitted = requested.clone().fit_within(budget);
    if fitted != requested {
        warn!(
            requested_attempts = requested.max_attempts,
            max_attempts = fitted.max_attempts,
            timeout_ms = fitted.timeout.as_millis() as u64,
            budget_ms = budget.as_millis() as u64,
            "Retry policy longer than the lookup deadline, shortened"
        );
    }
    fitted
}

/// How enroll reports a User Authority that stayed unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnavailablePolicy {
    /// Same 404 as a user that does not exist
    #[default]
    NotFound,
    /// 503 upstream unavailable
    Unavailable,
}

impl FromStr for UnavailablePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_found" => Ok(Self::NotFound),
            "unavailable" => Ok(Self::Unavailable),
            other => Err(ConfigError::Invalid {
                key: "ENROLLMENT_UNAVAILABLE_POLICY".to_string(),
                reason: format!("expected 'not_found' or 'unavailable', got '{}'", other),
            }),
        }
    }
}

/// Enrollment service configuration.
#[derive(Debug, Clone)]
pub struct EnrollmentServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    /// Retry policy for User and Course Authority calls
    pub retry: RetryConfig,
    pub user_service_url: String,
    pub course_service_url: String,
    pub fanout_concurrency: usize,
    pub unavailable_policy: UnavailablePolicy,
    /// Bound on the remote work of one request; lookups past it degrade
    pub lookup_deadline: Duration,
}

impl EnrollmentServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let unavailable_policy = match env::var("ENROLLMENT_UNAVAILABLE_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => UnavailablePolicy::default(),
        };

        let service =
            ServiceConfig::from_env("enrollment-service", "ENROLLMENT_SERVICE", DEFAULT_PORT);
        let lookup_deadline = lookup_deadline(service.request_timeout);

        Ok(Self {
            service,
            database: DatabaseConfig::from_env("ENROLLMENT_SERVICE"),
            retry: fit_retry_policy(RetryConfig::from_env()?, lookup_deadline),
            user_service_url: env::var("USER_SERVICE_URL")
                .unwrap_or_else(|_| "http://user-service:5001".to_string()),
            course_service_url: env::var("COURSE_SERVICE_URL")
                .unwrap_or_else(|_| "http://course-service:5002".to_string()),
            fanout_concurrency: env_or("ENROLLMENT_FANOUT_CONCURRENCY", DEFAULT_FANOUT_CONCURRENCY)
                .max(1),
            unavailable_policy,
            lookup_deadline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "not_found".parse::<UnavailablePolicy>().unwrap(),
            UnavailablePolicy::NotFound
        );
        assert_eq!(
            " Unavailable ".parse::<UnavailablePolicy>().unwrap(),
            UnavailablePolicy::Unavailable
        );
        assert!("retry".parse::<UnavailablePolicy>().is_err());
    }

    #[test]
    fn test_lookup_deadline_leaves_headroom() {
        assert_eq!(
            lookup_deadline(Duration::from_secs(30)),
            Duration::from_millis(22_500)
        );
    }

    #[test]
    fn test_slow_retry_policy_shortened_to_deadline() {
        let slow = RetryConfig {
            max_attempts: 4,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            timeout: Duration::from_secs(10),
            ..RetryConfig::default()
        };
        let budget = lookup_deadline(Duration::from_secs(30));

        let fitted = fit_retry_policy(slow, budget);
        assert_eq!(fitted.max_attempts, 2);
        assert!(fitted.worst_case() <= budget);
    }

    #[test]
    fn test_default_retry_policy_kept() {
        let budget = lookup_deadline(Duration::from_secs(30));
        assert_eq!(
            fit_retry_policy(RetryConfig::default(), budget),
            RetryConfig::default()
        );
    }

    #[test]
    fn test_default_policy_keeps_not_found() {
        assert_eq!(UnavailablePolicy::default(), UnavailablePolicy::NotFound);
    }
}
