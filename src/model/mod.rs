//! Record and table types.
//!
//! Pages and structured records describe what the recognition step produced;
//! tables describe what projection hands to export and display. Schema-less
//! values are plain [`serde_json::Value`]s with insertion-ordered objects.

mod page;
mod record;
mod table;

pub use page::{pages_from_image_dir, pages_from_images, PageRecord};
pub use record::{ExtractionResult, Mapping, StructuredRecord, ERROR_MARKER_KEY};
pub(crate) use record::json_type_name;
pub use table::{Cell, Row, Table, TableSet};
