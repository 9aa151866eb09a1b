//! Business logic layer.

mod course_service;

pub use course_service::{CourseManager, CourseService};
