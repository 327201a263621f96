//! `[booking]` configuration: the embedded order form.

use serde::{Deserialize, Serialize};

use crate::bridge::DEFAULT_MARKER;
use crate::config::util::{url_origin, validate_http_url};
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Order form loaded in the iframe.
    pub url: String,

    /// Accessible title of the iframe.
    pub title: String,

    /// Initial frame height in pixels.
    pub height: u32,

    /// Page that embeds the form.
    pub path: String,

    /// Origin resize messages must come from. Defaults to the origin of `url`.
    pub allowed_origin: Option<String>,

    /// Accept resize messages from any origin.
    pub any_origin: bool,

    /// Envelope marker field of the frame's messaging library.
    pub marker: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            url: "https://media.ctrealtymedia.com/order".into(),
            title: "CT Realty Media Order Form".into(),
            height: 800,
            path: "/book".into(),
            allowed_origin: None,
            any_origin: false,
            marker: DEFAULT_MARKER.into(),
        }
    }
}

impl BookingConfig {
    pub const URL: FieldPath = FieldPath::new("booking.url");
    pub const HEIGHT: FieldPath = FieldPath::new("booking.height");
    pub const PATH: FieldPath = FieldPath::new("booking.path");
    pub const ALLOWED_ORIGIN: FieldPath = FieldPath::new("booking.allowed_origin");
    pub const MARKER: FieldPath = FieldPath::new("booking.marker");

    /// Origins whose resize messages are applied; `None` accepts any.
    pub fn trusted_origins(&self) -> Option<Vec<String>> {
        if self.any_origin {
            return None;
        }
        let origin = match &self.allowed_origin {
            Some(origin) => origin.clone(),
            None => url_origin(&self.url)?,
        };
        Some(vec![origin])
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_http_url(Self::URL, &self.url, diag);

        if let Some(origin) = &self.allowed_origin {
            validate_http_url(Self::ALLOWED_ORIGIN, origin, diag);
        }
        if self.height == 0 {
            diag.error(Self::HEIGHT, "height must be greater than 0");
        }
        if !self.path.starts_with('/') {
            diag.error_with_hint(
                Self::PATH,
                format!("'{}' is not a site path", self.path),
                "paths start with '/', e.g. \"/book\"",
            );
        }
        if self.marker.trim().is_empty() {
            diag.error_with_hint(Self::MARKER, "marker must not be empty", "e.g. \"penpal\"");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trusted_origins_default_to_form_origin() {
        let config = BookingConfig::default();
        assert_eq!(
            config.trusted_origins(),
            Some(vec!["https://media.ctrealtymedia.com".to_string()])
        );
    }

    #[test]
    fn test_trusted_origins_override() {
        let config = BookingConfig {
            allowed_origin: Some("https://app.aryeo.com".into()),
            ..Default::default()
        };
        assert_eq!(
            config.trusted_origins(),
            Some(vec!["https://app.aryeo.com".to_string()])
        );

        let open = BookingConfig {
            any_origin: true,
            ..Default::default()
        };
        assert_eq!(open.trusted_origins(), None);
    }

    #[test]
    fn test_validate() {
        let config = BookingConfig {
            height: 0,
            path: "book".into(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }
}
