//! Project resolved metadata into a `<head>` fragment.
//!
//! Tag order:
//!
//! ```text
//! <title>, description, keywords, canonical, robots
//! og:*            (type, title, description, site_name, url, locale, image…)
//! twitter:*       (summary_large_image)
//! verification    (google-site-verification, msvalidate.01)
//! geo             (geo.region, geo.placename, geo.position, ICBM)
//! JSON-LD         (one <script> per document)
//! ```

use super::og::OgTags;
use super::resolve::ResolvedMetadata;
use crate::utils::html::HeadWriter;

/// Render the full head fragment. Fails only if a JSON-LD document cannot be
/// serialized.
pub fn render_head(meta: &ResolvedMetadata) -> serde_json::Result<String> {
    let mut head = HeadWriter::new();

    head.title(&meta.title);
    head.meta_name("description", &meta.description);
    if !meta.keywords.is_empty() {
        head.meta_name("keywords", &meta.keywords.join(", "));
    }
    head.link("canonical", &meta.canonical_url);
    head.meta_name("robots", meta.robots.as_str());

    let og = OgTags::from_metadata(meta);
    for (property, content) in og.properties() {
        head.meta_property(property, &content);
    }
    for (name, content) in og.twitter() {
        head.meta_name(name, content);
    }

    if let Some(token) = &meta.verification.google {
        head.meta_name("google-site-verification", token);
    }
    if let Some(token) = &meta.verification.bing {
        head.meta_name("msvalidate.01", token);
    }

    head.meta_name("geo.region", &meta.geo.region);
    if let Some(place) = &meta.geo.placename {
        head.meta_name("geo.placename", place);
    }
    if let Some((lat, lng)) = &meta.geo.position {
        head.meta_name("geo.position", &format!("{lat};{lng}"));
        head.meta_name("ICBM", &format!("{lat}, {lng}"));
    }

    for doc in meta.structured_data.to_json_strings()? {
        head.json_ld(&doc);
    }

    Ok(head.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteSettings;
    use crate::content::types::{Address, GeoPoint, SeoFields};
    use crate::seo::request::{PageMetadataRequest, ResolveContext};
    use crate::seo::resolve::resolve;
    use url::Url;

    fn render(request: &PageMetadataRequest, site: Option<&SiteSettings>) -> String {
        let base = Url::parse("https://www.ctrealtymedia.com").unwrap();
        let ctx = ResolveContext::for_path(&base, "/contact", "en_US");
        render_head(&resolve(request, site, None, &ctx)).unwrap()
    }

    #[test]
    fn test_default_head() {
        let html = render(&PageMetadataRequest::default(), None);
        assert!(html.starts_with(
            "<title>CT Realty Media | Premium Real Estate Photography</title>\n"
        ));
        assert!(html.contains(
            "<link rel=\"canonical\" href=\"https://www.ctrealtymedia.com/contact\">"
        ));
        assert!(html.contains("<meta name=\"robots\" content=\"index, follow\">"));
        assert!(html.contains("<meta property=\"og:type\" content=\"website\">"));
        assert!(html.contains("<meta property=\"og:locale\" content=\"en_US\">"));
        assert!(html.contains("<meta property=\"og:image:width\" content=\"1200\">"));
        assert!(html.contains("<meta property=\"og:image:type\" content=\"image/png\">"));
        assert!(html.contains("<meta name=\"twitter:card\" content=\"summary_large_image\">"));
        assert!(html.contains("<meta name=\"geo.region\" content=\"US-CT\">"));
        assert!(!html.contains("geo.position"));
        assert!(!html.contains("keywords"));
        assert!(!html.contains("google-site-verification"));
        assert_eq!(html.matches("application/ld+json").count(), 4);
    }

    #[test]
    fn test_optional_tags() {
        let site = SiteSettings {
            keywords: vec!["real estate photography".into(), "drone".into()],
            google_site_verification: Some("g-token".into()),
            bing_site_verification: Some("b-token".into()),
            address: Some(Address {
                city: Some("Hartford".into()),
                ..Default::default()
            }),
            geo: Some(GeoPoint {
                lat: Some("41.76".into()),
                lng: Some("-72.67".into()),
            }),
            ..Default::default()
        };
        let html = render(&PageMetadataRequest::default(), Some(&site));
        assert!(html.contains(
            "<meta name=\"keywords\" content=\"real estate photography, drone\">"
        ));
        assert!(html.contains("<meta name=\"google-site-verification\" content=\"g-token\">"));
        assert!(html.contains("<meta name=\"msvalidate.01\" content=\"b-token\">"));
        assert!(html.contains("<meta name=\"geo.placename\" content=\"Hartford\">"));
        assert!(html.contains("<meta name=\"geo.position\" content=\"41.76;-72.67\">"));
        assert!(html.contains("<meta name=\"ICBM\" content=\"41.76, -72.67\">"));
    }

    #[test]
    fn test_values_are_escaped() {
        let request = PageMetadataRequest {
            explicit_seo: Some(SeoFields {
                meta_title: Some("Tours & \"Drone\" <Media>".into()),
                ..Default::default()
            }),
            additional_json_ld: vec![serde_json::json!({"name": "</script><script>alert(1)"})],
            ..Default::default()
        };
        let html = render(&request, None);
        assert!(html.contains("<title>Tours &amp; &quot;Drone&quot; &lt;Media&gt;</title>"));
        assert!(html.contains("content=\"Tours &amp; &quot;Drone&quot; &lt;Media&gt;\""));
        assert_eq!(html.matches("</script>").count(), 5);
        assert!(!html.contains("</script><script>alert"));
    }
}
