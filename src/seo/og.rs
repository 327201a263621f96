//! Open Graph and Twitter Card tag values.
//!
//! Values only; `head` writes the tags.

use super::resolve::ResolvedMetadata;

/// Open Graph and Twitter tags of one page.
pub struct OgTags<'a> {
    pub og_type: &'static str,
    pub title: &'a str,
    pub description: &'a str,
    pub site_name: &'a str,
    pub url: &'a str,
    pub locale: &'a str,
    pub image: &'a str,
    pub image_width: u32,
    pub image_height: u32,
    pub image_type: Option<&'static str>,
    pub image_alt: &'a str,
    pub twitter_card: &'static str,
}

impl<'a> OgTags<'a> {
    pub fn from_metadata(meta: &'a ResolvedMetadata) -> Self {
        Self {
            og_type: "website",
            title: &meta.og_title,
            description: &meta.og_description,
            site_name: &meta.brand_name,
            url: &meta.canonical_url,
            locale: &meta.locale,
            image: &meta.share_image.url,
            image_width: meta.share_image.width,
            image_height: meta.share_image.height,
            image_type: meta.share_image.mime,
            image_alt: meta.share_image.alt.as_deref().unwrap_or(&meta.og_title),
            twitter_card: "summary_large_image",
        }
    }

    /// `(property, content)` pairs for `<meta property=...>`, in head order.
    pub fn properties(&self) -> Vec<(&'static str, String)> {
        let mut tags = vec![
            ("og:type", self.og_type.to_owned()),
            ("og:title", self.title.to_owned()),
            ("og:description", self.description.to_owned()),
            ("og:site_name", self.site_name.to_owned()),
            ("og:url", self.url.to_owned()),
            ("og:locale", self.locale.to_owned()),
            ("og:image", self.image.to_owned()),
            ("og:image:width", self.image_width.to_string()),
            ("og:image:height", self.image_height.to_string()),
        ];
        if let Some(mime) = self.image_type {
            tags.push(("og:image:type", mime.to_owned()));
        }
        tags.push(("og:image:alt", self.image_alt.to_owned()));
        tags
    }

    /// `(name, content)` pairs for `<meta name="twitter:...">`.
    pub fn twitter(&self) -> [(&'static str, &str); 4] {
        [
            ("twitter:card", self.twitter_card),
            ("twitter:title", self.title),
            ("twitter:description", self.description),
            ("twitter:image", self.image),
        ]
    }
}
