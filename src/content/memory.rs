//! In-memory `ContentStore` with canned documents and call counters.

use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::FxHashMap;

use super::{
    ContentStore, HomeContent, PageSettings, Service, SiteSettings, StoreError, StoreResult,
    Testimonial,
};

#[derive(Default)]
pub struct MemoryStore {
    pub site: Option<SiteSettings>,
    pub pages: FxHashMap<String, PageSettings>,
    pub services: Vec<Service>,
    pub testimonials: Vec<Testimonial>,
    pub home: Option<HomeContent>,
    /// Every query fails with an API error.
    pub fail: bool,
    pub site_calls: AtomicUsize,
    pub page_calls: AtomicUsize,
    pub service_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn with_page(mut self, slug: &str, page: PageSettings) -> Self {
        self.pages.insert(slug.to_string(), page);
        self
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> StoreResult<()> {
        if self.fail {
            return Err(StoreError::Api {
                status: 503,
                message: "unavailable".into(),
            });
        }
        Ok(())
    }
}

impl ContentStore for MemoryStore {
    async fn get_site_settings(&self) -> StoreResult<Option<SiteSettings>> {
        self.site_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.site.clone())
    }

    async fn get_page_settings(&self, slug: &str) -> StoreResult<Option<PageSettings>> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.pages.get(slug).cloned())
    }

    async fn get_services(&self) -> StoreResult<Vec<Service>> {
        self.service_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.services.clone())
    }

    async fn get_testimonials(&self) -> StoreResult<Vec<Testimonial>> {
        self.check()?;
        Ok(self.testimonials.clone())
    }

    async fn get_home_content(&self) -> StoreResult<Option<HomeContent>> {
        self.check()?;
        Ok(self.home.clone())
    }
}
