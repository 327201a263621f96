//! Per-field precedence resolution.
//!
//! Every output field walks the same chain and takes the first present value:
//!
//! ```text
//! explicit override → fetched page settings → site settings → literal default
//! ```
//!
//! Request props (`fallback_title`, `fallback_description`, `canonical`) slot
//! in between the page and site layers where a field has one.

use serde::Serialize;

use super::request::{PageMetadataRequest, ResolveContext};
use super::robots::Robots;
use super::schema::StructuredData;
use crate::content::image::{dimensions_from_url, mime_from_url};
use crate::content::types::{Address, SeoFields, SiteSettings, present};

// ============================================================================
// Literal defaults
// ============================================================================

pub const DEFAULT_BRAND: &str = "CT Realty Media";
pub const DEFAULT_SEPARATOR: &str = "|";
pub const DEFAULT_TAGLINE: &str = "Premium Real Estate Photography";
pub const DEFAULT_DESCRIPTION: &str = "Professional real estate photography, cinematic video tours, and drone services in Connecticut, Massachusetts, and Rhode Island.";
pub const DEFAULT_IMAGE: &str =
    "https://www.ctrealtymedia.com/wp-content/uploads/2024/05/ctrealtymedia_newlogo.png";
pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (1200, 630);
pub const DEFAULT_PHONE: &str = "+18603226961";
pub const DEFAULT_EMAIL: &str = "info@ctrealtymedia.com";
pub const DEFAULT_PRICE_RANGE: &str = "$$$";
pub const DEFAULT_STATE: &str = "CT";
pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_AREAS: [&str; 3] = ["Connecticut", "Rhode Island", "Massachusetts"];

// ============================================================================
// Output
// ============================================================================

/// Everything the head needs for one page. Derived only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetadata {
    pub brand_name: String,
    pub separator: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub og_title: String,
    pub og_description: String,
    pub share_image: ShareImage,
    pub canonical_url: String,
    pub robots: Robots,
    pub locale: String,
    pub geo: GeoMeta,
    pub verification: Verification,
    pub business: BusinessProfile,
    pub structured_data: StructuredData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ShareImage {
    fn new(url: &str, alt: Option<&str>) -> Self {
        let (width, height) = dimensions_from_url(url).unwrap_or(DEFAULT_IMAGE_SIZE);
        Self {
            url: url.to_owned(),
            width,
            height,
            mime: mime_from_url(url),
            alt: alt.map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoMeta {
    /// `US-<state>`.
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placename: Option<String>,
    /// `(lat, lng)`, only when both are known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bing: Option<String>,
}

/// Business facts shared by the Organization and LocalBusiness documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub name: String,
    /// Site root, with trailing slash.
    pub url: String,
    pub logo: String,
    pub site_description: String,
    pub telephone: String,
    pub email: String,
    pub price_range: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: String,
    pub postal_code: Option<String>,
    pub country: String,
    pub areas_served: Vec<String>,
    pub same_as: Vec<String>,
}

// ============================================================================
// Resolution
// ============================================================================

/// Page-level layer: the explicit override first, then fetched settings.
#[derive(Clone, Copy)]
struct PageLayer<'a> {
    explicit: Option<&'a SeoFields>,
    fetched: Option<&'a SeoFields>,
}

impl<'a> PageLayer<'a> {
    fn text(self, field: fn(&SeoFields) -> &Option<String>) -> Option<&'a str> {
        [self.explicit, self.fetched]
            .into_iter()
            .flatten()
            .find_map(|seo| present(field(seo).as_deref()))
    }

    fn image(self) -> Option<(&'a str, Option<&'a str>)> {
        [self.explicit, self.fetched]
            .into_iter()
            .flatten()
            .filter_map(|seo| seo.share_image.as_ref())
            .find_map(|image| Some((present(image.url())?, present(image.alt()))))
    }

    /// Flags come as a pair from whichever layer is present first.
    fn robots(self) -> Robots {
        self.explicit
            .or(self.fetched)
            .map(|seo| Robots::from_flags(seo.no_index, seo.no_follow))
            .unwrap_or_default()
    }
}

/// Merge every source into one [`ResolvedMetadata`]. Never fails.
pub fn resolve(
    request: &PageMetadataRequest,
    site: Option<&SiteSettings>,
    page: Option<&SeoFields>,
    context: &ResolveContext,
) -> ResolvedMetadata {
    let layer = PageLayer {
        explicit: request.explicit_seo.as_ref(),
        fetched: page,
    };
    let site_text = |field: fn(&SiteSettings) -> &Option<String>| {
        site.and_then(|s| present(field(s).as_deref()))
    };

    let brand = site_text(|s| &s.organization_name).unwrap_or(DEFAULT_BRAND);
    let separator = site_text(|s| &s.title_separator).unwrap_or(DEFAULT_SEPARATOR);

    let title = match layer.text(|s| &s.meta_title) {
        Some(title) => title.to_owned(),
        None => match present(request.fallback_title.as_deref()) {
            Some(title) => format!("{title} {separator} {brand}"),
            None => site_text(|s| &s.site_title)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("{brand} {separator} {DEFAULT_TAGLINE}")),
        },
    };

    let site_description = site_text(|s| &s.meta_description).unwrap_or(DEFAULT_DESCRIPTION);
    let description = layer
        .text(|s| &s.meta_description)
        .or_else(|| present(request.fallback_description.as_deref()))
        .unwrap_or(site_description)
        .to_owned();

    let share_image = layer
        .image()
        .or_else(|| {
            let image = site?.og_image.as_ref()?;
            Some((present(image.url())?, present(image.alt())))
        })
        .map(|(url, alt)| ShareImage::new(url, alt))
        .unwrap_or_else(|| ShareImage::new(DEFAULT_IMAGE, None));

    let canonical_url = layer
        .text(|s| &s.canonical_url)
        .or_else(|| present(request.canonical.as_deref()))
        .map(|url| context.absolute(url))
        .unwrap_or_else(|| context.location.clone());

    let business = business_profile(site, brand, site_description, &share_image, context);
    let geo = GeoMeta {
        region: format!("US-{}", business.state),
        placename: business.city.clone(),
        position: site
            .and_then(|s| s.geo.as_ref())
            .and_then(|g| g.position())
            .map(|(lat, lng)| (lat.to_owned(), lng.to_owned())),
    };

    let mut resolved = ResolvedMetadata {
        brand_name: brand.to_owned(),
        separator: separator.to_owned(),
        og_title: layer
            .text(|s| &s.og_title)
            .map(str::to_owned)
            .unwrap_or_else(|| title.clone()),
        og_description: layer
            .text(|s| &s.og_description)
            .map(str::to_owned)
            .unwrap_or_else(|| description.clone()),
        title,
        description,
        keywords: site
            .map(|s| {
                s.keywords
                    .iter()
                    .filter_map(|k| present(Some(k.as_str())))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default(),
        share_image,
        canonical_url,
        robots: layer.robots(),
        locale: context.locale.clone(),
        geo,
        verification: Verification {
            google: site_text(|s| &s.google_site_verification).map(str::to_owned),
            bing: site_text(|s| &s.bing_site_verification).map(str::to_owned),
        },
        business,
        structured_data: StructuredData::default(),
    };
    resolved.structured_data = StructuredData::build(&resolved, request, context);
    resolved
}

fn business_profile(
    site: Option<&SiteSettings>,
    brand: &str,
    site_description: &str,
    share_image: &ShareImage,
    context: &ResolveContext,
) -> BusinessProfile {
    let address = site.and_then(|s| s.address.as_ref());
    let address_text = |field: fn(&Address) -> &Option<String>| {
        address
            .and_then(|a| present(field(a).as_deref()))
            .map(str::to_owned)
    };
    let site_text = |field: fn(&SiteSettings) -> &Option<String>| {
        site.and_then(|s| present(field(s).as_deref()))
    };

    let areas: Vec<String> = site
        .map(|s| {
            s.areas_served
                .iter()
                .filter_map(|a| present(Some(a.as_str())))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    BusinessProfile {
        name: brand.to_owned(),
        url: context.base_url.to_string(),
        logo: site
            .and_then(|s| s.logo.as_ref())
            .and_then(|l| present(l.url()))
            .unwrap_or(&share_image.url)
            .to_owned(),
        site_description: site_description.to_owned(),
        telephone: site_text(|s| &s.phone).unwrap_or(DEFAULT_PHONE).to_owned(),
        email: site_text(|s| &s.email).unwrap_or(DEFAULT_EMAIL).to_owned(),
        price_range: site_text(|s| &s.price_range)
            .unwrap_or(DEFAULT_PRICE_RANGE)
            .to_owned(),
        street: address_text(|a| &a.street),
        city: address_text(|a| &a.city),
        state: address_text(|a| &a.state).unwrap_or_else(|| DEFAULT_STATE.to_owned()),
        postal_code: address_text(|a| &a.zip),
        country: address_text(|a| &a.country).unwrap_or_else(|| DEFAULT_COUNTRY.to_owned()),
        areas_served: if areas.is_empty() {
            DEFAULT_AREAS.iter().map(|a| (*a).to_owned()).collect()
        } else {
            areas
        },
        same_as: site
            .and_then(|s| s.social_profiles.as_ref())
            .map(|p| p.urls())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::image::ImageSource;
    use crate::content::types::{GeoPoint, SocialProfiles};
    use crate::seo::request::Breadcrumb;
    use url::Url;

    fn context() -> ResolveContext {
        let base = Url::parse("https://www.ctrealtymedia.com").unwrap();
        ResolveContext::for_path(&base, "/services", "en_US")
    }

    fn seo(title: &str) -> SeoFields {
        SeoFields {
            meta_title: Some(title.into()),
            ..Default::default()
        }
    }

    fn site(title: &str) -> SiteSettings {
        SiteSettings {
            site_title: Some(title.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_defaults() {
        let meta = resolve(&PageMetadataRequest::default(), None, None, &context());
        assert_eq!(meta.title, "CT Realty Media | Premium Real Estate Photography");
        assert_eq!(meta.description, DEFAULT_DESCRIPTION);
        assert_eq!(meta.og_title, meta.title);
        assert_eq!(meta.share_image.url, DEFAULT_IMAGE);
        assert_eq!((meta.share_image.width, meta.share_image.height), (1200, 630));
        assert_eq!(meta.share_image.mime, Some("image/png"));
        assert_eq!(meta.canonical_url, "https://www.ctrealtymedia.com/services");
        assert_eq!(meta.robots.as_str(), "index, follow");
        assert_eq!(meta.geo.region, "US-CT");
        assert!(meta.geo.position.is_none());
        assert_eq!(meta.business.telephone, DEFAULT_PHONE);
        assert_eq!(meta.business.areas_served, DEFAULT_AREAS);
        assert!(meta.business.same_as.is_empty());
    }

    #[test]
    fn test_title_precedence_over_all_combinations() {
        for mask in 0..8u8 {
            let explicit = (mask & 1 != 0).then(|| seo("Explicit"));
            let page = (mask & 2 != 0).then(|| seo("Page"));
            let site = (mask & 4 != 0).then(|| site("Site"));
            let request = PageMetadataRequest {
                explicit_seo: explicit.clone(),
                ..Default::default()
            };

            let meta = resolve(&request, site.as_ref(), page.as_ref(), &context());
            let expected = if explicit.is_some() {
                "Explicit"
            } else if page.is_some() {
                "Page"
            } else if site.is_some() {
                "Site"
            } else {
                "CT Realty Media | Premium Real Estate Photography"
            };
            assert_eq!(meta.title, expected, "mask {mask:03b}");
        }
    }

    #[test]
    fn test_fallback_title_composes_with_brand() {
        let request = PageMetadataRequest {
            fallback_title: Some("Services".into()),
            ..Default::default()
        };
        let site = SiteSettings {
            organization_name: Some("CTRM".into()),
            title_separator: Some("-".into()),
            site_title: Some("Ignored".into()),
            ..Default::default()
        };
        let meta = resolve(&request, Some(&site), None, &context());
        assert_eq!(meta.title, "Services - CTRM");
    }

    #[test]
    fn test_blank_strings_fall_through() {
        let explicit = SeoFields {
            meta_title: Some("   ".into()),
            meta_description: Some(String::new()),
            ..Default::default()
        };
        let request = PageMetadataRequest {
            explicit_seo: Some(explicit),
            ..Default::default()
        };
        let site = SiteSettings {
            site_title: Some("Site Title".into()),
            meta_description: Some("Site description".into()),
            organization_name: Some(" ".into()),
            ..Default::default()
        };
        let meta = resolve(&request, Some(&site), Some(&seo("Page Title")), &context());
        assert_eq!(meta.title, "Page Title");
        assert_eq!(meta.description, "Site description");
        assert_eq!(meta.brand_name, DEFAULT_BRAND);
    }

    #[test]
    fn test_og_fields_override_or_follow() {
        let page = SeoFields {
            meta_title: Some("Title".into()),
            og_description: Some("Share text".into()),
            ..Default::default()
        };
        let meta = resolve(&PageMetadataRequest::default(), None, Some(&page), &context());
        assert_eq!(meta.og_title, "Title");
        assert_eq!(meta.og_description, "Share text");
    }

    #[test]
    fn test_robots_from_single_layer() {
        let page = SeoFields {
            no_index: true,
            ..Default::default()
        };
        let meta = resolve(&PageMetadataRequest::default(), None, Some(&page), &context());
        assert_eq!(meta.robots.as_str(), "noindex, follow");

        // An explicit override replaces the fetched flags as a pair.
        let request = PageMetadataRequest {
            explicit_seo: Some(SeoFields {
                no_follow: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let meta = resolve(&request, None, Some(&page), &context());
        assert_eq!(meta.robots.as_str(), "index, nofollow");
    }

    #[test]
    fn test_canonical_chain() {
        let mut request = PageMetadataRequest {
            canonical: Some("/services/".into()),
            ..Default::default()
        };
        let meta = resolve(&request, None, None, &context());
        assert_eq!(meta.canonical_url, "https://www.ctrealtymedia.com/services/");

        request.explicit_seo = Some(SeoFields {
            canonical_url: Some("https://www.ctrealtymedia.com/real-estate-services".into()),
            ..Default::default()
        });
        let meta = resolve(&request, None, None, &context());
        assert_eq!(
            meta.canonical_url,
            "https://www.ctrealtymedia.com/real-estate-services"
        );
    }

    #[test]
    fn test_share_image_dimensions_from_cdn_name() {
        let page = SeoFields {
            share_image: Some(ImageSource::Url(
                "https://cdn.sanity.io/images/p/d/abc-800x600.jpg".into(),
            )),
            ..Default::default()
        };
        let site = SiteSettings {
            og_image: Some(ImageSource::Url("https://x/site.png".into())),
            ..Default::default()
        };
        let meta = resolve(&PageMetadataRequest::default(), Some(&site), Some(&page), &context());
        assert_eq!(meta.share_image.url, "https://cdn.sanity.io/images/p/d/abc-800x600.jpg");
        assert_eq!((meta.share_image.width, meta.share_image.height), (800, 600));
        assert_eq!(meta.share_image.mime, Some("image/jpeg"));

        let meta = resolve(&PageMetadataRequest::default(), Some(&site), None, &context());
        assert_eq!(meta.share_image.url, "https://x/site.png");
        assert_eq!((meta.share_image.width, meta.share_image.height), (1200, 630));
    }

    #[test]
    fn test_social_profiles_same_as() {
        let site: SiteSettings = serde_json::from_value(serde_json::json!({
            "socialProfiles": {"instagram": "https://x", "facebook": "", "youtube": null}
        }))
        .unwrap();
        let meta = resolve(&PageMetadataRequest::default(), Some(&site), None, &context());
        assert_eq!(meta.business.same_as, vec!["https://x".to_string()]);
    }

    #[test]
    fn test_geo_and_address() {
        let site = SiteSettings {
            address: Some(Address {
                city: Some("Hartford".into()),
                state: Some("MA".into()),
                ..Default::default()
            }),
            geo: Some(GeoPoint {
                lat: Some("41.76".into()),
                lng: Some("-72.67".into()),
            }),
            social_profiles: Some(SocialProfiles::default()),
            ..Default::default()
        };
        let meta = resolve(&PageMetadataRequest::default(), Some(&site), None, &context());
        assert_eq!(meta.geo.region, "US-MA");
        assert_eq!(meta.geo.placename.as_deref(), Some("Hartford"));
        assert_eq!(
            meta.geo.position,
            Some(("41.76".to_string(), "-72.67".to_string()))
        );
    }

    #[test]
    fn test_breadcrumbs_flow_into_structured_data() {
        let request = PageMetadataRequest {
            breadcrumbs: vec![
                Breadcrumb::new("Home", "/"),
                Breadcrumb::new("Services", "/services"),
            ],
            ..Default::default()
        };
        let meta = resolve(&request, None, None, &context());
        let list = meta.structured_data.breadcrumbs.unwrap();
        assert_eq!(list.item_list_element.len(), 2);
    }
}
