//! Image fields and CDN URL building.
//!
//! An image field reaches us in one of two shapes:
//!
//! ```text
//! "https://cdn.sanity.io/images/wbmh4kzh/production/abc-1200x630.png"  (GROQ projection)
//! { "asset": { "_ref": "image-abc-1200x630-png" }, "alt": "..." }     (raw document)
//! ```
//!
//! Raw references are turned into CDN URLs by [`ImageUrlBuilder`], the same
//! way the studio's image-url helper does.

use serde::{Deserialize, Serialize};

use super::types::present;

const CDN_BASE: &str = "https://cdn.sanity.io/images";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSource {
    Url(String),
    Asset {
        asset: AssetRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ImageSource {
    /// The image URL, if this source already carries one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => present(Some(url)),
            Self::Asset { asset, .. } => present(asset.url.as_deref()),
        }
    }

    pub fn alt(&self) -> Option<&str> {
        match self {
            Self::Url(_) => None,
            Self::Asset { alt, .. } => present(alt.as_deref()),
        }
    }

    /// Fill in the CDN URL of a raw asset reference.
    ///
    /// Returns `false` when the source has neither a URL nor a parseable reference.
    pub fn resolve(&mut self, builder: &ImageUrlBuilder) -> bool {
        match self {
            Self::Url(url) => present(Some(url)).is_some(),
            Self::Asset { asset, .. } => {
                if present(asset.url.as_deref()).is_none() {
                    asset.url = asset
                        .reference
                        .as_deref()
                        .and_then(|reference| builder.url_for(reference));
                }
                asset.url.is_some()
            }
        }
    }
}

/// Builds CDN URLs for one project/dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// `image-<id>-<w>x<h>-<ext>` → `https://cdn.sanity.io/images/<project>/<dataset>/<id>-<w>x<h>.<ext>`
    pub fn url_for(&self, reference: &str) -> Option<String> {
        let rest = reference.strip_prefix("image-")?;
        let (rest, ext) = rest.rsplit_once('-')?;
        let (id, dims) = rest.rsplit_once('-')?;
        parse_dimensions(dims)?;
        if id.is_empty() || ext.is_empty() {
            return None;
        }
        Some(format!(
            "{CDN_BASE}/{}/{}/{id}-{dims}.{ext}",
            self.project_id, self.dataset
        ))
    }
}

/// Pixel size encoded in a CDN file name (`...-1200x630.png`).
pub fn dimensions_from_url(url: &str) -> Option<(u32, u32)> {
    let path = url.split(['?', '#']).next()?;
    let file = path.rsplit('/').next()?;
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    let (_, dims) = stem.rsplit_once('-')?;
    parse_dimensions(dims)
}

fn parse_dimensions(dims: &str) -> Option<(u32, u32)> {
    let (w, h) = dims.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

/// MIME type from the URL's file extension, for `og:image:type`.
pub fn mime_from_url(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next()?;
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "avif" => Some("image/avif"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
