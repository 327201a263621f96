//! Booking iframe markup.

use crate::config::BookingConfig;
use crate::utils::html::escape_attr;

/// `<iframe>` hosting the order form, sized by the resize bridge afterwards.
pub fn render_embed(booking: &BookingConfig) -> String {
    format!(
        "<iframe src=\"{}\" title=\"{}\" allow=\"geolocation\" style=\"min-height: {h}px; height: {h}px; width: 100%; border: 0;\"></iframe>\n",
        escape_attr(&booking.url),
        escape_attr(&booking.title),
        h = booking.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_embed() {
        let html = render_embed(&BookingConfig::default());
        assert!(html.starts_with("<iframe src=\"https://media.ctrealtymedia.com/order\""));
        assert!(html.contains("title=\"CT Realty Media Order Form\""));
        assert!(html.contains("allow=\"geolocation\""));
        assert!(html.contains("min-height: 800px; height: 800px"));
    }

    #[test]
    fn test_embed_escapes_attributes() {
        let booking = BookingConfig {
            url: "https://media.example.com/order?a=1&b=2".into(),
            title: "Book \"now\"".into(),
            height: 640,
            ..Default::default()
        };
        let html = render_embed(&booking);
        assert!(html.contains("a=1&amp;b=2"));
        assert!(html.contains("Book &quot;now&quot;"));
        assert!(html.contains("height: 640px"));
    }
}
