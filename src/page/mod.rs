//! Page-level metadata loading.

mod controller;

pub use controller::{MetadataController, PageLoad};
