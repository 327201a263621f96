//! `query`: CMS documents and resolved metadata as JSON.
//!
//! Absent singleton documents print as `null`. Store failures are errors here,
//! unlike page rendering, except for testimonials which fall back to the
//! built-in reviews.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;

use super::QueryTarget;
use super::common::{load_page, print_json};
use crate::config::SiteConfig;
use crate::content::{ContentStore, testimonials_or_default};

pub async fn run_query<S: ContentStore + 'static>(
    config: &SiteConfig,
    store: Arc<S>,
    target: &QueryTarget,
    pretty: bool,
) -> Result<()> {
    let value = query_value(config, store, target).await?;
    print_json(&value, pretty)
}

async fn query_value<S: ContentStore + 'static>(
    config: &SiteConfig,
    store: Arc<S>,
    target: &QueryTarget,
) -> Result<Value> {
    let value = match target {
        QueryTarget::Site => {
            let site = store
                .get_site_settings()
                .await
                .context("failed to fetch site settings")?;
            serde_json::to_value(site)?
        }
        QueryTarget::Page { slug } => {
            let page = store
                .get_page_settings(slug)
                .await
                .with_context(|| format!("failed to fetch page settings for '{slug}'"))?;
            serde_json::to_value(page)?
        }
        QueryTarget::Services => {
            let services = store
                .get_services()
                .await
                .context("failed to fetch services")?;
            serde_json::to_value(services)?
        }
        QueryTarget::Testimonials => serde_json::to_value(testimonials_or_default(&*store).await)?,
        QueryTarget::Home => {
            let home = store
                .get_home_content()
                .await
                .context("failed to fetch home content")?;
            serde_json::to_value(home)?
        }
        QueryTarget::Metadata { path } => serde_json::to_value(load_page(config, store, path).await?)?,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::content::memory::MemoryStore;
    use crate::content::{SeoFields, Service};

    fn store() -> Arc<MemoryStore> {
        Arc::new(
            MemoryStore {
                services: vec![Service {
                    title: Some("3D Virtual Tours".into()),
                    ..Default::default()
                }],
                ..Default::default()
            }
            .with_page(
                "contact",
                SeoFields {
                    meta_title: Some("Contact | CT Realty Media".into()),
                    ..Default::default()
                },
            ),
        )
    }

    #[tokio::test]
    async fn test_query_documents() {
        let config = SiteConfig::default();

        let site = query_value(&config, store(), &QueryTarget::Site).await.unwrap();
        assert!(site.is_null());

        let page = QueryTarget::Page {
            slug: "contact".into(),
        };
        let page = query_value(&config, store(), &page).await.unwrap();
        assert_eq!(page["metaTitle"], "Contact | CT Realty Media");

        let services = query_value(&config, store(), &QueryTarget::Services)
            .await
            .unwrap();
        assert_eq!(services[0]["title"], "3D Virtual Tours");
    }

    #[tokio::test]
    async fn test_query_failures() {
        let config = SiteConfig::default();
        let store = Arc::new(MemoryStore::failing());

        assert!(
            query_value(&config, Arc::clone(&store), &QueryTarget::Site)
                .await
                .is_err()
        );
        let reviews = query_value(&config, store, &QueryTarget::Testimonials)
            .await
            .unwrap();
        assert_eq!(reviews.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_query_metadata() {
        let config = test_parse_config("[[pages]]\npath = \"/contact\"\nslug = \"contact\"\n");
        let target = QueryTarget::Metadata {
            path: "/contact".into(),
        };
        let meta = query_value(&config, store(), &target).await.unwrap();
        assert_eq!(meta["title"], "Contact | CT Realty Media");
        assert_eq!(meta["structuredData"]["webpage"]["@type"], "WebPage");
    }
}
