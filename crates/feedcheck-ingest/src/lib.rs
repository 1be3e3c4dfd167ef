//! Feed file ingestion: discovery and tab-delimited record reading.

pub mod discovery;
pub mod error;
pub mod reader;

pub use discovery::{file_name, list_feed_files, template_token};
pub use error::{IngestError, Result};
pub use reader::{REMAINDER_KEY, Record, RecordValue, RowSource, read_rows};
