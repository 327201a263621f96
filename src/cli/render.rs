//! `render`: one page's head HTML on stdout.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::common::load_page;
use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::seo::render_head;

pub async fn render_page<S: ContentStore + 'static>(
    config: &SiteConfig,
    store: Arc<S>,
    path: &str,
) -> Result<()> {
    let meta = load_page(config, store, path).await?;
    let html = render_head(&meta).context("failed to serialize JSON-LD")?;

    let mut out = std::io::stdout().lock();
    out.write_all(html.as_bytes())
        .context("failed to write to stdout")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::SeoFields;
    use crate::content::memory::MemoryStore;

    #[tokio::test]
    async fn test_load_page_uses_configured_override() {
        let config = test_parse_config(
            r#"
[[pages]]
path = "/book"
slug = "book"

[pages.seo]
metaTitle = "Book Your Shoot | CT Realty Media"
noIndex = true
"#,
        );
        let store = Arc::new(MemoryStore::default().with_page(
            "book",
            SeoFields {
                meta_title: Some("from the store".into()),
                ..Default::default()
            },
        ));

        let meta = load_page(&config, Arc::clone(&store), "/book/").await.unwrap();
        assert_eq!(meta.title, "Book Your Shoot | CT Realty Media");
        assert_eq!(meta.robots.as_str(), "noindex, follow");
        assert_eq!(store.page_calls(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_path_uses_site_defaults() {
        let config = test_parse_config("");
        let store = Arc::new(MemoryStore::default());

        let meta = load_page(&config, store, "/pricing").await.unwrap();
        assert_eq!(meta.canonical_url, "https://www.ctrealtymedia.com/pricing");
        assert_eq!(
            meta.title,
            "CT Realty Media | Premium Real Estate Photography"
        );
    }
}
