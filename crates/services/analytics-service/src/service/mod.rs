//! Business logic layer.

mod analytics_service;

pub use analytics_service::{AnalyticsReporter, AnalyticsService};
