//! HTTP handlers.

pub mod enrollment_handler;
