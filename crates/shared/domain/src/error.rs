//! Rule violations raised by domain types.

use thiserror::Error;

use crate::constants::{MAX_RATING, MIN_PASSWORD_LENGTH, MIN_RATING};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,

    /// Hashing backend failure, never caused by the caller
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("rating must be between {} and {}", MIN_RATING, MAX_RATING)]
    RatingOutOfRange(f64),
}

impl DomainError {
    /// Whether the caller can fix the input and retry.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, DomainError::PasswordHash(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
