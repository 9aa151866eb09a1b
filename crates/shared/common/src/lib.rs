//! Common utilities shared across all services.
//!
//! This crate provides:
//! - Unified error handling for HTTP
//! - Configuration structures
//! - Validating extractors, shared response bodies and the health route
//! - The retrying client for calls to peer services (`remote` feature)

pub mod config;
pub mod error;
pub mod extractors;
#[cfg(feature = "database")]
pub mod health;
#[cfg(feature = "remote")]
pub mod remote;
pub mod response;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use extractors::{ValidatedJson, ValidatedQuery};
#[cfg(feature = "database")]
pub use health::health_routes;
#[cfg(feature = "remote")]
pub use remote::{RemoteBody, RemoteClient, RemoteError, RemoteOutcome};
pub use response::{HealthResponse, MessageResponse};
