//! `[site]` configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::util::validate_http_url;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Where the site is served and how it is labeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Public site root, used for canonical URLs and JSON-LD ids.
    pub url: String,

    /// Open Graph locale (e.g., "en_US").
    pub locale: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            url: "https://www.ctrealtymedia.com".into(),
            locale: "en_US".into(),
        }
    }
}

impl SiteSectionConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");
    pub const LOCALE: FieldPath = FieldPath::new("site.locale");

    /// Parsed site root. Call after validation.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_http_url(Self::URL, &self.url, diag);

        if self.locale.trim().is_empty() {
            diag.error_with_hint(Self::LOCALE, "locale must not be empty", "e.g. \"en_US\"");
        }
    }
}
