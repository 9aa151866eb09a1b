//! Business logic layer.

mod enrollment_service;

pub use enrollment_service::{
    EnrollmentManager, EnrollmentService, ENROLLMENT_NOT_FOUND, USER_DOES_NOT_EXIST,
};
