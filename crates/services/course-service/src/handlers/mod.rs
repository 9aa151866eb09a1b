//! HTTP handlers.

pub mod course_handler;
