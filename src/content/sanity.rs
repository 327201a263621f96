//! Sanity HTTP query API backend.
//!
//! Each store method sends one GROQ query:
//!
//! ```text
//! GET https://<project>.api.sanity.io/v<api>/data/query/<dataset>?query=<groq>&$slug="about"
//! → { "ms": 3, "query": "...", "result": <document | [documents] | null> }
//! ```
//!
//! Image fields are projected to URLs server-side where possible; anything
//! still a raw asset reference is resolved locally.

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::image::ImageUrlBuilder;
use super::{
    ContentStore, HomeContent, PageSettings, Service, SiteSettings, StoreError, StoreResult,
    Testimonial,
};
use crate::config::StoreConfig;
use crate::debug;

const SITE_SETTINGS: &str = r#"*[_id == "seo"][0]{
    ...,
    "ogImage": coalesce(ogImage.asset->url, ogImage),
    "logo": coalesce(logo.asset->url, logo)
}"#;

const PAGE_SETTINGS: &str = r#"*[_type == "sitePage" && slug.current == $slug][0].seo{
    ...,
    "shareImage": coalesce(shareImage.asset->url, shareImage)
}"#;

const SERVICES: &str = r#"*[_type == "service"] | order(title asc) {
    title,
    description,
    "image": coalesce(serviceImage.asset->url, image.asset->url),
    "alt": coalesce(serviceImage.alt, image.alt),
    features,
    slug
}"#;

const TESTIMONIALS: &str = r#"*[_type == "testimonial"] | order(_createdAt desc)"#;

const HOME_CONTENT: &str = r#"*[_id == "homepage"][0]{
    heroHeading,
    heroSubheading,
    "heroImage": heroImage.asset->url,
    "heroImageAlt": heroImage.alt,
    ctaTitle,
    ctaText,
    "servicesHeaderImage": servicesHeaderImage.asset->url,
    "servicesHeaderImageAlt": servicesHeaderImage.alt
}"#;

/// Response envelope of the query endpoint.
#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Error body (`{"error": {"description": "..."}}`).
#[derive(Deserialize, Default)]
#[serde(default)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ApiErrorBody {
    description: Option<String>,
}

pub struct SanityStore {
    client: Client,
    endpoint: String,
    token: Option<String>,
    images: ImageUrlBuilder,
}

impl SanityStore {
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        let token = match &config.token_env {
            Some(var) => Some(
                std::env::var(var)
                    .ok()
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| StoreError::MissingToken(var.clone()))?,
            ),
            None => None,
        };

        let client = Client::builder()
            .user_agent(concat!("ctrm/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: query_endpoint(config),
            token,
            images: ImageUrlBuilder::new(&config.project_id, &config.dataset),
        })
    }

    /// Run one GROQ query; `params` are `$name` bindings, JSON-encoded.
    async fn query<T: DeserializeOwned>(&self, groq: &str, params: &[(&str, &str)]) -> StoreResult<T> {
        let mut pairs: Vec<(String, String)> = vec![("query".into(), groq.into())];
        for (name, value) in params {
            pairs.push((format!("${name}"), serde_json::to_string(value)?));
        }

        let mut request = self.client.get(&self.endpoint).query(&pairs);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!("content"; "GET {} ({} bytes of GROQ)", self.endpoint, groq.len());
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiError>(&body)
                .ok()
                .and_then(|e| e.error.description)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: QueryResponse<T> = serde_json::from_slice(&body)?;
        Ok(envelope.result)
    }
}

/// `https://<project>.api(cdn).sanity.io/v<api>/data/query/<dataset>`
fn query_endpoint(config: &StoreConfig) -> String {
    let host = if config.use_cdn { "apicdn" } else { "api" };
    let version = config.api_version.trim_start_matches('v');
    format!(
        "https://{}.{host}.sanity.io/v{version}/data/query/{}",
        config.project_id, config.dataset
    )
}

impl ContentStore for SanityStore {
    async fn get_site_settings(&self) -> StoreResult<Option<SiteSettings>> {
        let mut site: Option<SiteSettings> = self.query(SITE_SETTINGS, &[]).await?;
        if let Some(site) = site.as_mut() {
            site.resolve_images(&self.images);
        }
        Ok(site)
    }

    async fn get_page_settings(&self, slug: &str) -> StoreResult<Option<PageSettings>> {
        let mut page: Option<PageSettings> = self.query(PAGE_SETTINGS, &[("slug", slug)]).await?;
        if let Some(page) = page.as_mut() {
            page.resolve_images(&self.images);
        }
        Ok(page)
    }

    async fn get_services(&self) -> StoreResult<Vec<Service>> {
        let services: Option<Vec<Service>> = self.query(SERVICES, &[]).await?;
        Ok(services.unwrap_or_default())
    }

    async fn get_testimonials(&self) -> StoreResult<Vec<Testimonial>> {
        let testimonials: Option<Vec<Testimonial>> = self.query(TESTIMONIALS, &[]).await?;
        Ok(testimonials.unwrap_or_default())
    }

    async fn get_home_content(&self) -> StoreResult<Option<HomeContent>> {
        self.query(HOME_CONTENT, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    #[test]
    fn test_query_endpoint() {
        let mut config = StoreConfig::default();
        assert_eq!(
            query_endpoint(&config),
            "https://wbmh4kzh.api.sanity.io/v2023-05-03/data/query/production"
        );

        config.use_cdn = true;
        config.api_version = "v2024-01-01".into();
        assert_eq!(
            query_endpoint(&config),
            "https://wbmh4kzh.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let config = StoreConfig {
            token_env: Some("CTRM_TEST_TOKEN_THAT_IS_NEVER_SET".into()),
            ..Default::default()
        };
        assert!(matches!(
            SanityStore::from_config(&config),
            Err(StoreError::MissingToken(_))
        ));
    }

    #[test]
    fn test_envelope_with_null_result() {
        let body = r#"{"ms": 2, "query": "*[_id == \"seo\"][0]", "result": null}"#;
        let parsed: QueryResponse<Option<SiteSettings>> = serde_json::from_str(body).unwrap();
        assert!(parsed.result.is_none());
    }

    #[test]
    fn test_envelope_with_projected_site_settings() {
        let body = r#"{"result": {
            "_id": "seo",
            "siteTitle": "CT Realty Media | Premium Real Estate Photography",
            "ogImage": "https://cdn.sanity.io/images/wbmh4kzh/production/abc-1200x630.jpg",
            "socialProfiles": {"instagram": "https://instagram.com/ctrealtymedia"}
        }}"#;
        let parsed: QueryResponse<Option<SiteSettings>> = serde_json::from_str(body).unwrap();
        let site = parsed.result.unwrap();
        assert_eq!(
            site.og_image.as_ref().and_then(|i| i.url()),
            Some("https://cdn.sanity.io/images/wbmh4kzh/production/abc-1200x630.jpg")
        );
        assert_eq!(
            site.social_profiles.unwrap().urls(),
            vec!["https://instagram.com/ctrealtymedia".to_string()]
        );
    }
}
