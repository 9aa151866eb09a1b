//! HTTP handlers.

pub mod auth_handler;
pub mod user_handler;
