//! Dataset export backend.
//!
//! Reads the `data.ndjson` file produced by `sanity dataset export` (one
//! document per line) and answers store queries in memory. The file is read
//! on first use and kept for the life of the store.
//!
//! Draft documents (`_id` starting with `drafts.`) are skipped, matching what
//! the public query API returns without a token.

use std::path::PathBuf;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::OnceCell;

use super::image::{ImageSource, ImageUrlBuilder};
use super::types::Slug;
use super::{
    ContentStore, HomeContent, PageSettings, Service, SiteSettings, StoreError, StoreResult,
    Testimonial,
};
use crate::config::StoreConfig;
use crate::debug;

pub struct ExportStore {
    path: PathBuf,
    images: ImageUrlBuilder,
    documents: OnceCell<Vec<Value>>,
}

impl ExportStore {
    pub fn new(path: impl Into<PathBuf>, images: ImageUrlBuilder) -> Self {
        Self {
            path: path.into(),
            images,
            documents: OnceCell::new(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            config.export.clone(),
            ImageUrlBuilder::new(&config.project_id, &config.dataset),
        )
    }

    async fn documents(&self) -> StoreResult<&[Value]> {
        let docs = self
            .documents
            .get_or_try_init(|| async {
                let text = tokio::fs::read_to_string(&self.path)
                    .await
                    .map_err(|e| StoreError::Io(self.path.clone(), e))?;
                let docs = self.parse(&text)?;
                debug!("content"; "loaded {} documents from {}", docs.len(), self.path.display());
                Ok::<_, StoreError>(docs)
            })
            .await?;
        Ok(docs)
    }

    fn parse(&self, text: &str) -> StoreResult<Vec<Value>> {
        let mut docs = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let doc: Value = serde_json::from_str(line).map_err(|error| StoreError::Export {
                source_name: self.path.display().to_string(),
                line: index + 1,
                error,
            })?;
            if !is_draft(&doc) {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    async fn by_id<T: DeserializeOwned>(&self, id: &str) -> StoreResult<Option<T>> {
        let docs = self.documents().await?;
        docs.iter()
            .find(|doc| doc.get("_id").and_then(Value::as_str) == Some(id))
            .map(|doc| T::deserialize(doc).map_err(StoreError::from))
            .transpose()
    }

    async fn by_type(&self, doc_type: &str) -> StoreResult<Vec<&Value>> {
        let docs = self.documents().await?;
        Ok(docs
            .iter()
            .filter(|doc| doc_type_of(doc) == Some(doc_type))
            .collect())
    }
}

fn is_draft(doc: &Value) -> bool {
    doc.get("_id")
        .and_then(Value::as_str)
        .is_some_and(|id| id.starts_with("drafts."))
}

fn doc_type_of(doc: &Value) -> Option<&str> {
    doc.get("_type").and_then(Value::as_str)
}

fn str_field<'a>(doc: &'a Value, pointer: &str) -> &'a str {
    doc.pointer(pointer).and_then(Value::as_str).unwrap_or("")
}

/// Raw service document → the projected shape the query API returns.
fn project_service(doc: &Value, images: &ImageUrlBuilder) -> StoreResult<Service> {
    let text = |field: &str| doc.get(field).and_then(Value::as_str).map(str::to_owned);
    let features = match doc.get("features") {
        Some(v) if !v.is_null() => Vec::<String>::deserialize(v)?,
        _ => Vec::new(),
    };
    let slug = match doc.get("slug") {
        Some(v) if !v.is_null() => Some(Slug::deserialize(v)?),
        _ => None,
    };

    // coalesce(serviceImage, image)
    let image_field = ["serviceImage", "image"]
        .into_iter()
        .find(|field| doc.get(*field).is_some_and(|v| !v.is_null()));

    Ok(Service {
        title: text("title"),
        description: text("description"),
        image: image_field.and_then(|field| image_url(doc, field, images)),
        alt: image_field.and_then(|field| image_alt(doc, field)),
        features,
        slug,
    })
}

/// Image field of a raw document, resolved to its CDN URL.
fn image_url(doc: &Value, field: &str, images: &ImageUrlBuilder) -> Option<String> {
    let mut source: ImageSource = serde_json::from_value(doc.get(field)?.clone()).ok()?;
    source.resolve(images);
    source.url().map(str::to_owned)
}

fn image_alt(doc: &Value, field: &str) -> Option<String> {
    doc.get(field)?
        .get("alt")?
        .as_str()
        .map(str::to_owned)
}

impl ContentStore for ExportStore {
    async fn get_site_settings(&self) -> StoreResult<Option<SiteSettings>> {
        let mut site: Option<SiteSettings> = self.by_id("seo").await?;
        if let Some(site) = site.as_mut() {
            site.resolve_images(&self.images);
        }
        Ok(site)
    }

    async fn get_page_settings(&self, slug: &str) -> StoreResult<Option<PageSettings>> {
        let pages = self.by_type("sitePage").await?;
        let Some(seo) = pages
            .into_iter()
            .find(|doc| str_field(doc, "/slug/current") == slug)
            .and_then(|doc| doc.get("seo"))
            .filter(|seo| !seo.is_null())
        else {
            return Ok(None);
        };

        let mut page = PageSettings::deserialize(seo)?;
        page.resolve_images(&self.images);
        Ok(Some(page))
    }

    async fn get_services(&self) -> StoreResult<Vec<Service>> {
        let mut docs = self.by_type("service").await?;
        docs.sort_by(|a, b| str_field(a, "/title").cmp(str_field(b, "/title")));
        docs.into_iter()
            .map(|doc| project_service(doc, &self.images))
            .collect()
    }

    async fn get_testimonials(&self) -> StoreResult<Vec<Testimonial>> {
        let mut docs = self.by_type("testimonial").await?;
        // RFC 3339 timestamps sort lexically
        docs.sort_by(|a, b| str_field(b, "/_createdAt").cmp(str_field(a, "/_createdAt")));
        docs.into_iter()
            .map(|doc| Testimonial::deserialize(doc).map_err(StoreError::from))
            .collect()
    }

    async fn get_home_content(&self) -> StoreResult<Option<HomeContent>> {
        let docs = self.documents().await?;
        let Some(doc) = docs
            .iter()
            .find(|doc| doc.get("_id").and_then(Value::as_str) == Some("homepage"))
        else {
            return Ok(None);
        };

        let text = |field: &str| doc.get(field).and_then(Value::as_str).map(str::to_owned);
        Ok(Some(HomeContent {
            hero_heading: text("heroHeading"),
            hero_subheading: text("heroSubheading"),
            hero_image: image_url(doc, "heroImage", &self.images),
            hero_image_alt: image_alt(doc, "heroImage"),
            cta_title: text("ctaTitle"),
            cta_text: text("ctaText"),
            services_header_image: image_url(doc, "servicesHeaderImage", &self.images),
            services_header_image_alt: image_alt(doc, "servicesHeaderImage"),
        }))
    }
}
