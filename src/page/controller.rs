//! Fetch-and-render cycle for one page.
//!
//! ```text
//! subscribe(request)
//!   ├─ publish render #0 (no CMS data)
//!   ├─ spawn get_site_settings()   ──settle──► publish
//!   ├─ spawn get_page_settings()   ──settle──► publish   (slug, no override)
//!   └─ spawn get_services()        ──settle──► publish   (service catalog)
//! ```
//!
//! Fetches run concurrently and settle in any order; every settlement
//! re-resolves from everything known so far. A failed fetch is logged and
//! counts as an absent document. There is no retry and no timeout.

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::content::types::present;
use crate::content::{ContentStore, PageSettings, Service, SiteSettings, StoreResult};
use crate::seo::resolve::DEFAULT_BRAND;
use crate::seo::schema::service_documents;
use crate::seo::{PageMetadataRequest, ResolveContext, ResolvedMetadata, resolve};
use crate::{debug, log};

/// One published render plus which fetches are still outstanding.
#[derive(Debug, Clone)]
pub struct PageState {
    pub metadata: ResolvedMetadata,
    pub site_settled: bool,
    pub page_settled: bool,
    pub services_settled: bool,
}

impl PageState {
    /// No fetch is outstanding; this render is final.
    pub fn is_settled(&self) -> bool {
        self.site_settled && self.page_settled && self.services_settled
    }

    fn pending(&self) -> usize {
        [self.site_settled, self.page_settled, self.services_settled]
            .iter()
            .filter(|settled| !**settled)
            .count()
    }
}

/// What a page needs fetched besides its metadata request.
#[derive(Debug, Clone, Default)]
pub struct PageLoad {
    pub request: PageMetadataRequest,
    /// Append a `Service` JSON-LD document per CMS service.
    pub service_catalog: bool,
}

impl From<PageMetadataRequest> for PageLoad {
    fn from(request: PageMetadataRequest) -> Self {
        Self {
            request,
            service_catalog: false,
        }
    }
}

/// Drives metadata for pages of one site against a shared store.
pub struct MetadataController<S> {
    store: Arc<S>,
    context: ResolveContext,
}

impl<S> Clone for MetadataController<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            context: self.context.clone(),
        }
    }
}

impl<S: ContentStore + 'static> MetadataController<S> {
    pub fn new(store: Arc<S>, context: ResolveContext) -> Self {
        Self { store, context }
    }

    /// Start loading a page. The receiver holds the initial render at once
    /// and sees a new one each time a fetch settles.
    ///
    /// Must be called within a Tokio runtime.
    pub fn subscribe(&self, load: impl Into<PageLoad>) -> watch::Receiver<PageState> {
        let PageLoad {
            request,
            service_catalog,
        } = load.into();
        let slug = request.lookup_slug().map(str::to_owned);

        let sources = Sources {
            site: None,
            page: None,
            services: Vec::new(),
            site_settled: false,
            page_settled: slug.is_none(),
            services_settled: !service_catalog,
        };
        let initial = sources.render(&request, &self.context);
        debug!("render"; "{} initial: {}", self.context.location, initial.metadata.title);

        let (tx, rx) = watch::channel(initial);
        let render = Arc::new(Render {
            request,
            context: self.context.clone(),
            sources: Mutex::new(sources),
            tx,
        });

        {
            let store = Arc::clone(&self.store);
            let render = Arc::clone(&render);
            tokio::spawn(async move {
                let result = store.get_site_settings().await;
                render.publish("site settings", |s| {
                    s.site = settle("site settings", result);
                    s.site_settled = true;
                });
            });
        }

        if let Some(slug) = slug {
            let store = Arc::clone(&self.store);
            let render = Arc::clone(&render);
            tokio::spawn(async move {
                let result = store.get_page_settings(&slug).await;
                render.publish("page settings", |s| {
                    s.page = settle("page settings", result);
                    s.page_settled = true;
                });
            });
        }

        if service_catalog {
            let store = Arc::clone(&self.store);
            tokio::spawn(async move {
                let result = store.get_services().await.map(Some);
                render.publish("services", |s| {
                    s.services = settle("services", result).unwrap_or_default();
                    s.services_settled = true;
                });
            });
        }

        rx
    }

    /// Load a page and wait for its final render.
    pub async fn load(&self, load: impl Into<PageLoad>) -> ResolvedMetadata {
        let mut rx = self.subscribe(load);
        if let Ok(state) = rx.wait_for(PageState::is_settled).await {
            return state.metadata.clone();
        }
        // Every fetch task is gone; keep the last render.
        let state = rx.borrow();
        state.metadata.clone()
    }
}

/// Documents known so far for one page.
struct Sources {
    site: Option<SiteSettings>,
    page: Option<PageSettings>,
    services: Vec<Service>,
    site_settled: bool,
    page_settled: bool,
    services_settled: bool,
}

impl Sources {
    fn render(&self, request: &PageMetadataRequest, context: &ResolveContext) -> PageState {
        let mut request = Cow::Borrowed(request);
        if !self.services.is_empty() {
            let provider = self
                .site
                .as_ref()
                .and_then(|s| present(s.organization_name.as_deref()))
                .unwrap_or(DEFAULT_BRAND);
            match service_documents(&self.services, provider) {
                Ok(docs) => request.to_mut().additional_json_ld.extend(docs),
                Err(e) => log!("render"; "service catalog skipped: {}", e),
            }
        }

        PageState {
            metadata: resolve(&request, self.site.as_ref(), self.page.as_ref(), context),
            site_settled: self.site_settled,
            page_settled: self.page_settled,
            services_settled: self.services_settled,
        }
    }
}

/// Shared by the fetch tasks of one subscription.
struct Render {
    request: PageMetadataRequest,
    context: ResolveContext,
    sources: Mutex<Sources>,
    tx: watch::Sender<PageState>,
}

impl Render {
    fn publish(&self, what: &str, update: impl FnOnce(&mut Sources)) {
        let mut sources = self.sources.lock();
        update(&mut sources);
        let state = sources.render(&self.request, &self.context);
        debug!(
            "render";
            "{} after {}: {} ({} pending)",
            self.context.location,
            what,
            state.metadata.title,
            state.pending()
        );
        self.tx.send_replace(state);
    }
}

/// Failed fetches count as absent documents.
fn settle<T>(what: &str, result: StoreResult<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|e| {
        log!("content"; "{} fetch failed: {}", what, e);
        None
    })
}
