//! `[[pages]]` configuration: one entry per routed page.
//!
//! ```toml
//! [[pages]]
//! path = "/services"
//! slug = "services"
//! title = "Services"
//! description = "Real estate photography, video, drone and 3D tours."
//! service_catalog = true
//! breadcrumbs = [
//!     { name = "Home", url = "/" },
//!     { name = "Services", url = "/services" },
//! ]
//!
//! # Explicit override; skips the per-page CMS lookup
//! [pages.seo]
//! metaTitle = "Real Estate Media Services | CT Realty Media"
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::content::SeoFields;
use crate::seo::{Breadcrumb, PageMetadataRequest};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Route, e.g. `/services`.
    pub path: String,

    /// `sitePage` slug holding this page's SEO fields.
    pub slug: Option<String>,

    /// Plain page title, composed with the brand.
    pub title: Option<String>,

    pub description: Option<String>,

    pub canonical: Option<String>,

    pub breadcrumbs: Vec<Breadcrumb>,

    /// Explicit SEO override.
    pub seo: Option<SeoFields>,

    /// Emit `Service` JSON-LD for every CMS service.
    pub service_catalog: bool,
}

impl PageConfig {
    pub const PATH: FieldPath = FieldPath::new("pages.path");
    pub const BREADCRUMBS: FieldPath = FieldPath::new("pages.breadcrumbs");

    pub fn request(&self) -> PageMetadataRequest {
        PageMetadataRequest {
            explicit_seo: self.seo.clone(),
            slug: self.slug.clone(),
            fallback_title: self.title.clone(),
            fallback_description: self.description.clone(),
            canonical: self.canonical.clone(),
            breadcrumbs: self.breadcrumbs.clone(),
            additional_json_ld: Vec::new(),
        }
    }

    /// Output directory name for this route: `/` → ``, `/services/` → `services`.
    pub fn route_dir(&self) -> &str {
        self.path.trim_matches('/')
    }
}

/// Validate the whole `[[pages]]` array.
pub fn validate_pages(pages: &[PageConfig], diag: &mut ConfigDiagnostics) {
    let mut seen = FxHashSet::default();

    for (index, page) in pages.iter().enumerate() {
        if !page.path.starts_with('/') {
            diag.error_with_hint(
                PageConfig::PATH,
                format!("pages[{index}]: '{}' is not a site path", page.path),
                "paths start with '/', e.g. \"/services\"",
            );
            continue;
        }
        if page.path.split('/').any(|seg| seg == "." || seg == "..") {
            diag.error(
                PageConfig::PATH,
                format!("pages[{index}]: '{}' must not contain '.' or '..'", page.path),
            );
            continue;
        }
        if !seen.insert(page.route_dir()) {
            diag.error(
                PageConfig::PATH,
                format!("pages[{index}]: duplicate path '{}'", page.path),
            );
        }
        if page.breadcrumbs.iter().any(|b| b.name.trim().is_empty()) {
            diag.error(
                PageConfig::BREADCRUMBS,
                format!("pages[{index}]: breadcrumb names must not be empty"),
            );
        }
    }
}
