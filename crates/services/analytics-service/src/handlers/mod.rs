//! HTTP handlers.

pub mod stats_handler;
