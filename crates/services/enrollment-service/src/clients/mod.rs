//! Clients for the peer services the orchestrator depends on.
//!
//! Each client turns a classified remote outcome into the answer the
//! orchestrator needs. Retrying happens inside [`common::RemoteClient`].

mod course_client;
mod user_client;

pub use course_client::{CourseCatalog, HttpCourseCatalog};
pub use user_client::{HttpUserDirectory, UserDirectory, UserLookup};

#[cfg(test)]
pub use course_client::MockCourseCatalog;
#[cfg(test)]
pub use user_client::MockUserDirectory;
