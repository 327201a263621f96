//! Page metadata resolution.
//!
//! # Module Structure
//!
//! ```text
//! seo/
//! ├── request    # PageMetadataRequest, Breadcrumb, ResolveContext
//! ├── resolve    # precedence chains → ResolvedMetadata
//! ├── robots     # Robots directive
//! ├── schema     # JSON-LD documents
//! ├── og         # Open Graph / Twitter tag data
//! └── head       # <head> fragment rendering
//! ```
//!
//! Resolution is pure: the same request and documents always give the same
//! output, and missing documents only mean more literal defaults.

pub mod head;
pub mod og;
pub mod request;
pub mod resolve;
pub mod robots;
pub mod schema;

pub use head::render_head;
pub use request::{Breadcrumb, PageMetadataRequest, ResolveContext};
pub use resolve::{ResolvedMetadata, resolve};
