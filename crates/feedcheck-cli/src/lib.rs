//! CLI library components for the feed checker.

pub mod logging;
pub mod settings;
pub mod summary;
