//! Feed configuration and reference header definitions.

pub mod config;
pub mod error;
pub mod headers;
pub mod registry;

pub use crate::config::{DEFAULT_HEADERS_DIR, DEFAULT_SOURCE_DIR, FeedConfig, install_config};
pub use crate::error::{Result, StandardsError};
pub use crate::headers::HeaderStore;
pub use crate::registry::{builtin_pairs, builtin_templates};
