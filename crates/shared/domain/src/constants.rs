//! Domain-level constants.
//!
//! These constants define business rules, validation requirements and the
//! literal markers that appear in degraded responses.

// =============================================================================
// Enrichment markers
// =============================================================================

/// Title attached to an enrollment whose course the Course Authority does not know
pub const TITLE_NOT_FOUND: &str = "Not Found";

/// Title attached to an enrollment whose course could not be fetched
pub const TITLE_FETCH_ERROR: &str = "Error Fetching Title";

/// Title used when course metadata is missing or has no title
pub const TITLE_UNKNOWN: &str = "Unknown";

// =============================================================================
// Statistics
// =============================================================================

/// Default number of entries in the popular courses report
pub const DEFAULT_POPULAR_COURSES_LIMIT: u64 = 5;

/// Largest popular courses report a caller may ask for
pub const MAX_POPULAR_COURSES_LIMIT: u64 = 100;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Lowest rating a feedback entry may carry
pub const MIN_RATING: f64 = 0.0;

/// Highest rating a feedback entry may carry
pub const MAX_RATING: f64 = 5.0;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 1;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
