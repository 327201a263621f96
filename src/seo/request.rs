//! Resolver inputs supplied by the calling page.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::content::SeoFields;

/// What a page asks of the resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetadataRequest {
    /// Structured override. When set, the per-page CMS lookup is skipped.
    pub explicit_seo: Option<SeoFields>,
    /// Slug of the `sitePage` document holding this page's SEO fields.
    pub slug: Option<String>,
    /// Plain page title, composed with the brand name.
    pub fallback_title: Option<String>,
    pub fallback_description: Option<String>,
    /// Canonical URL supplied by the page.
    pub canonical: Option<String>,
    /// Trail from the home page to this page. Empty: no BreadcrumbList.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Extra JSON-LD documents, each emitted in its own script block.
    pub additional_json_ld: Vec<serde_json::Value>,
}

impl PageMetadataRequest {
    /// Slug to fetch per-page settings for, unless an explicit override makes
    /// the lookup unnecessary.
    pub fn lookup_slug(&self) -> Option<&str> {
        if self.explicit_seo.is_some() {
            return None;
        }
        self.slug.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Environment of one render: where the site lives and where the page is.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    pub base_url: Url,
    /// Current document location; last resort for the canonical URL.
    pub location: String,
    /// Open Graph locale, e.g. `en_US`.
    pub locale: String,
}

impl ResolveContext {
    /// Context for the page at `path` (e.g. `/services`) under `base_url`.
    pub fn for_path(base_url: &Url, path: &str, locale: impl Into<String>) -> Self {
        let base_url = site_root(base_url);
        let location = base_url
            .join(path.trim_start_matches('/'))
            .map(String::from)
            .unwrap_or_else(|_| base_url.to_string());
        Self {
            base_url,
            location,
            locale: locale.into(),
        }
    }

    /// Absolute form of a possibly site-relative URL.
    ///
    /// `/contact` is relative to the site root, which may itself have a path.
    pub fn absolute(&self, url: &str) -> String {
        let relative = if url.starts_with("//") {
            url
        } else {
            url.trim_start_matches('/')
        };
        self.base_url
            .join(relative)
            .map(String::from)
            .unwrap_or_else(|_| url.to_string())
    }
}

/// `https://host/sub` → `https://host/sub/`, so joins stay under `sub`.
fn site_root(url: &Url) -> Url {
    let mut root = url.clone();
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    root
}
