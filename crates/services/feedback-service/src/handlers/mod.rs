//! HTTP handlers.

pub mod feedback_handler;
