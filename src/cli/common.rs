//! Helpers shared by the store-backed commands.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::log;
use crate::page::{MetadataController, PageLoad};
use crate::seo::{PageMetadataRequest, ResolveContext, ResolvedMetadata};

pub fn base_url(config: &SiteConfig) -> Result<Url> {
    config
        .site
        .base_url()
        .with_context(|| format!("invalid site url '{}'", config.site.url))
}

/// Controller and load inputs for a site path.
///
/// Paths without a `[[pages]]` entry resolve from site-wide data only.
pub fn page_controller<S: ContentStore + 'static>(
    config: &SiteConfig,
    store: Arc<S>,
    base: &Url,
    path: &str,
) -> (MetadataController<S>, PageLoad) {
    let context = ResolveContext::for_path(base, path, config.site.locale.as_str());
    let load = match config.page(path) {
        Some(page) => PageLoad {
            request: page.request(),
            service_catalog: page.service_catalog,
        },
        None => {
            log!("render"; "no [[pages]] entry for '{}', using site defaults", path);
            PageMetadataRequest::default().into()
        }
    };
    (MetadataController::new(store, context), load)
}

/// Resolve one site path to its final metadata.
pub async fn load_page<S: ContentStore + 'static>(
    config: &SiteConfig,
    store: Arc<S>,
    path: &str,
) -> Result<ResolvedMetadata> {
    let base = base_url(config)?;
    let (controller, load) = page_controller(config, store, &base, path);
    Ok(controller.load(load).await)
}

/// Write `value` as one JSON document to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    let mut out = std::io::stdout().lock();
    writeln!(out, "{json}").context("failed to write to stdout")?;
    Ok(())
}
