//! CMS document shapes.
//!
//! Field names follow the studio schema (camelCase). Every field is optional:
//! editors can leave anything blank, and a blank string is treated the same as
//! a missing one (see [`present`]).

use serde::{Deserialize, Serialize};

use super::image::{ImageSource, ImageUrlBuilder};

/// Return the trimmed value if it carries any text.
///
/// The CMS hands back `""` for cleared fields, so every precedence chain goes
/// through this before deciding a source is present.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Site settings (singleton `_id == "seo"`)
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_title: Option<String>,
    pub title_separator: Option<String>,
    pub meta_description: Option<String>,
    pub og_image: Option<ImageSource>,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    pub organization_name: Option<String>,
    pub logo: Option<ImageSource>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
    pub geo: Option<GeoPoint>,
    pub price_range: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub areas_served: Vec<String>,
    pub social_profiles: Option<SocialProfiles>,
    pub google_site_verification: Option<String>,
    pub bing_site_verification: Option<String>,
}

impl SiteSettings {
    /// Turn raw asset references into CDN URLs.
    pub fn resolve_images(&mut self, builder: &ImageUrlBuilder) {
        resolve_image(&mut self.og_image, builder);
        resolve_image(&mut self.logo, builder);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

/// Coordinates as entered in the studio (strings, e.g. `"41.7658"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoPoint {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl GeoPoint {
    /// Both coordinates, or nothing.
    pub fn position(&self) -> Option<(&str, &str)> {
        Some((present(self.lat.as_deref())?, present(self.lng.as_deref())?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialProfiles {
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub tiktok: Option<String>,
    pub google_business: Option<String>,
}

impl SocialProfiles {
    /// Non-empty profile URLs in schema order.
    pub fn urls(&self) -> Vec<String> {
        [
            &self.instagram,
            &self.facebook,
            &self.youtube,
            &self.linkedin,
            &self.twitter,
            &self.tiktok,
            &self.google_business,
        ]
        .into_iter()
        .filter_map(|url| present(url.as_deref()))
        .map(str::to_owned)
        .collect()
    }
}

// ============================================================================
// Per-page SEO (`seoFields` object)
// ============================================================================

/// SEO fields of a single page.
///
/// The same shape serves as the explicit override a page can pass in, and as
/// the `seo` field of a `sitePage` document fetched by slug.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoFields {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub focus_keyword: Option<String>,
    pub share_image: Option<ImageSource>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub canonical_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub no_index: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub no_follow: bool,
}

/// Fetched per-page settings.
pub type PageSettings = SeoFields;

impl SeoFields {
    pub fn resolve_images(&mut self, builder: &ImageUrlBuilder) {
        resolve_image(&mut self.share_image, builder);
    }
}

// ============================================================================
// Page content
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub alt: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    pub slug: Option<Slug>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slug {
    pub current: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub name: Option<String>,
    pub text: Option<String>,
    pub rating: Option<f64>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomeContent {
    pub hero_heading: Option<String>,
    pub hero_subheading: Option<String>,
    pub hero_image: Option<String>,
    pub hero_image_alt: Option<String>,
    pub cta_title: Option<String>,
    pub cta_text: Option<String>,
    pub services_header_image: Option<String>,
    pub services_header_image_alt: Option<String>,
}

// ============================================================================
// Helpers
// ============================================================================

fn resolve_image(slot: &mut Option<ImageSource>, builder: &ImageUrlBuilder) {
    if let Some(image) = slot
        && !image.resolve(builder)
    {
        *slot = None;
    }
}

/// Deserialize `null` as the type's default (`[]`, `false`).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value: Option<T> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
