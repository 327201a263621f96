//! Head fragment build.
//!
//! For every `[[pages]]` entry, writes under `<output>/<route>/`:
//! - `head.html` - title, meta, link and JSON-LD tags
//! - `metadata.json` - the resolved metadata
//! - `embed.html` - booking iframe (booking page only)
//!
//! Pages resolve concurrently; each waits for all of its fetches to settle.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinSet;

use super::common::{base_url, page_controller};
use crate::bridge::render_embed;
use crate::config::{PageConfig, SiteConfig};
use crate::content::ContentStore;
use crate::logger::ProgressLine;
use crate::seo::{ResolvedMetadata, render_head};
use crate::utils::plural_count;
use crate::{debug, log};

/// Build every configured page. Returns the number of pages written.
pub async fn build_site<S: ContentStore + 'static>(
    config: &SiteConfig,
    store: Arc<S>,
) -> Result<usize> {
    let output = &config.build.output;
    init_output(output, config.build.clean)?;

    if config.pages.is_empty() {
        log!("build"; "no [[pages]] configured, nothing to do");
        return Ok(0);
    }

    let base = base_url(config)?;
    let mut tasks = JoinSet::new();
    for (index, page) in config.pages.iter().enumerate() {
        let (controller, load) = page_controller(config, Arc::clone(&store), &base, &page.path);
        tasks.spawn(async move { (index, controller.load(load).await) });
    }

    let progress = ProgressLine::new("pages", config.pages.len());
    let mut written = 0;
    while let Some(joined) = tasks.join_next().await {
        let (index, meta) = joined.context("page render task failed")?;
        let page = &config.pages[index];
        let dir = write_page(config, page, &meta)
            .with_context(|| format!("failed to write page '{}'", page.path))?;
        debug!("build"; "{} -> {}", page.path, config.root_relative(&dir).display());
        written += 1;
        progress.inc();
    }
    progress.finish();

    log!("build"; "wrote {} to {}", plural_count(written, "page"), config.root_relative(output).display());
    Ok(written)
}

/// Create the output directory, removing it first when `clean` is set.
fn init_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clean {}", output.display()))?;
    }
    fs::create_dir_all(output).with_context(|| format!("failed to create {}", output.display()))
}

fn write_page(config: &SiteConfig, page: &PageConfig, meta: &ResolvedMetadata) -> Result<PathBuf> {
    let dir = config.build.output.join(page.route_dir());
    fs::create_dir_all(&dir)?;

    write_file(&dir.join("head.html"), &render_head(meta)?)?;
    write_file(&dir.join("metadata.json"), &serde_json::to_string_pretty(meta)?)?;
    if config.is_booking_page(page) {
        write_file(&dir.join("embed.html"), &render_embed(&config.booking))?;
    }
    Ok(dir)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::SiteSettings;
    use crate::content::memory::MemoryStore;

    const CONFIG: &str = r#"
[[pages]]
path = "/"
slug = "home"

[[pages]]
path = "/services"
title = "Services"
service_catalog = true

[[pages]]
path = "/book"
title = "Book Your Shoot"
"#;

    fn config_in(dir: &Path) -> SiteConfig {
        let mut config = test_parse_config(CONFIG);
        config.set_root(dir);
        config.build.output = dir.join("dist");
        config
    }

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore {
            site: Some(SiteSettings {
                organization_name: Some("CT Realty Media".into()),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_build_writes_every_page() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let written = build_site(&config, store()).await.unwrap();
        assert_eq!(written, 3);

        let out = dir.path().join("dist");
        assert!(out.join("head.html").exists());
        assert!(out.join("metadata.json").exists());
        assert!(!out.join("embed.html").exists());

        let head = fs::read_to_string(out.join("services/head.html")).unwrap();
        assert!(head.contains("<title>Services | CT Realty Media</title>"));

        let embed = fs::read_to_string(out.join("book/embed.html")).unwrap();
        assert!(embed.contains("allow=\"geolocation\""));
    }

    #[tokio::test]
    async fn test_metadata_json_is_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        build_site(&config, store()).await.unwrap();

        let json = fs::read_to_string(dir.path().join("dist/book/metadata.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["canonicalUrl"], "https://www.ctrealtymedia.com/book");
        assert_eq!(value["robots"], "index, follow");
    }

    #[tokio::test]
    async fn test_clean_removes_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        let stale = config.build.output.join("old/head.html");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "stale").unwrap();

        build_site(&config, store()).await.unwrap();
        assert!(stale.exists());

        config.build.clean = true;
        build_site(&config, store()).await.unwrap();
        assert!(!stale.exists());
        assert!(config.build.output.join("head.html").exists());
    }
}
