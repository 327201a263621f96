//! Read-only access to CMS documents.
//!
//! # Module Structure
//!
//! ```text
//! content/
//! ├── types      # SiteSettings, SeoFields, Service, Testimonial, HomeContent
//! ├── image      # image fields, CDN URL building
//! ├── sanity     # HTTP query API backend
//! ├── export     # NDJSON dataset export backend
//! └── memory     # in-memory double (tests)
//! ```
//!
//! Callers depend on [`ContentStore`] only. The concrete store is built once in
//! `main` (see [`open_store`]) and passed down.

mod export;
pub mod image;
#[cfg(test)]
pub mod memory;
mod sanity;
pub mod types;

pub use export::ExportStore;
pub use sanity::SanityStore;
pub use types::{HomeContent, PageSettings, SeoFields, Service, SiteSettings, Testimonial};

use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{StoreConfig, StoreProvider};

/// Content fetch failures.
///
/// Never fatal for page rendering: callers log and fall back to defaults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to content API failed")]
    Http(#[from] reqwest::Error),

    #[error("content API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed document in `{source_name}` at line {line}")]
    Export {
        source_name: String,
        line: usize,
        #[source]
        error: serde_json::Error,
    },

    #[error("unexpected document shape")]
    Decode(#[from] serde_json::Error),

    #[error("auth token variable `{0}` is not set")]
    MissingToken(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Capability interface over the content-management system.
///
/// Each method is one logical read query; `None` / empty means the document
/// does not exist. Futures are `Send` so fetches can run as spawned tasks.
pub trait ContentStore: Send + Sync {
    /// Singleton site-wide SEO document.
    fn get_site_settings(&self) -> impl Future<Output = StoreResult<Option<SiteSettings>>> + Send;

    /// `seo` field of the site page whose slug matches.
    fn get_page_settings(
        &self,
        slug: &str,
    ) -> impl Future<Output = StoreResult<Option<PageSettings>>> + Send;

    /// All services, ordered by title.
    fn get_services(&self) -> impl Future<Output = StoreResult<Vec<Service>>> + Send;

    /// All testimonials, newest first.
    fn get_testimonials(&self) -> impl Future<Output = StoreResult<Vec<Testimonial>>> + Send;

    /// Singleton home page document.
    fn get_home_content(&self) -> impl Future<Output = StoreResult<Option<HomeContent>>> + Send;
}

/// Store selected by `[store]` config.
pub enum AnyStore {
    Sanity(SanityStore),
    Export(ExportStore),
}

/// Build the configured store. Called once per process.
pub fn open_store(config: &StoreConfig) -> StoreResult<AnyStore> {
    Ok(match config.provider {
        StoreProvider::Sanity => AnyStore::Sanity(SanityStore::from_config(config)?),
        StoreProvider::Export => AnyStore::Export(ExportStore::from_config(config)),
    })
}

impl ContentStore for AnyStore {
    async fn get_site_settings(&self) -> StoreResult<Option<SiteSettings>> {
        match self {
            Self::Sanity(s) => s.get_site_settings().await,
            Self::Export(s) => s.get_site_settings().await,
        }
    }

    async fn get_page_settings(&self, slug: &str) -> StoreResult<Option<PageSettings>> {
        match self {
            Self::Sanity(s) => s.get_page_settings(slug).await,
            Self::Export(s) => s.get_page_settings(slug).await,
        }
    }

    async fn get_services(&self) -> StoreResult<Vec<Service>> {
        match self {
            Self::Sanity(s) => s.get_services().await,
            Self::Export(s) => s.get_services().await,
        }
    }

    async fn get_testimonials(&self) -> StoreResult<Vec<Testimonial>> {
        match self {
            Self::Sanity(s) => s.get_testimonials().await,
            Self::Export(s) => s.get_testimonials().await,
        }
    }

    async fn get_home_content(&self) -> StoreResult<Option<HomeContent>> {
        match self {
            Self::Sanity(s) => s.get_home_content().await,
            Self::Export(s) => s.get_home_content().await,
        }
    }
}

// ============================================================================
// Fallback content
// ============================================================================

/// Reviews shown when the store has none or cannot be reached.
pub fn default_testimonials() -> Vec<Testimonial> {
    let review = |name: &str, text: &str| Testimonial {
        name: Some(name.into()),
        text: Some(text.into()),
        rating: Some(5.0),
        source: Some("Google Review".into()),
    };
    vec![
        review(
            "K B",
            "Chris was AMAZING to work with and his photos are top notch! I would highly recommend Chris. He went above and beyond and worked on our photos on New Year's Day!! Incredible service!!",
        ),
        review(
            "Cheryl Whitelaw",
            "Our photographer, Chris was very professional and had our new pictures up and running within days. Great experience! We highly recommend Chris for your future photo shoots.",
        ),
        review(
            "Avery Barlow",
            "Chris was fast and responsive. His pictures were beautiful! Would recommend to anyone looking for reasonably priced awesome pics!",
        ),
    ]
}

/// Fetch testimonials, substituting the defaults on failure or an empty list.
pub async fn testimonials_or_default<S: ContentStore>(store: &S) -> Vec<Testimonial> {
    match store.get_testimonials().await {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => default_testimonials(),
        Err(e) => {
            crate::log!("content"; "testimonials fetch failed: {}", e);
            default_testimonials()
        }
    }
}
