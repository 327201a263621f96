//! Schema.org JSON-LD documents.
//!
//! Each document is a typed record; optional parts are `Option`/`Vec` fields
//! skipped at serialization time, so a document only carries what is known.
//! With `serde_json`'s `preserve_order` the keys come out in declaration order.

use serde::Serialize;
use serde_json::Value;

use super::request::{Breadcrumb, PageMetadataRequest, ResolveContext};
use super::resolve::{BusinessProfile, ResolvedMetadata};
use crate::content::Service;
use crate::content::types::present;

const CONTEXT: &str = "https://schema.org";

/// Every JSON-LD block of one page, in emission order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredData {
    pub organization: Organization,
    pub local_business: LocalBusiness,
    pub website: WebSite,
    pub webpage: WebPage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadcrumbs: Option<BreadcrumbList>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional: Vec<Value>,
}

impl StructuredData {
    pub fn build(
        meta: &ResolvedMetadata,
        request: &PageMetadataRequest,
        context: &ResolveContext,
    ) -> Self {
        let business = &meta.business;
        let website_id = format!("{}#website", business.url);

        Self {
            organization: Organization::new(business),
            local_business: LocalBusiness::new(meta),
            website: WebSite {
                context: CONTEXT,
                kind: "WebSite",
                id: website_id.clone(),
                name: business.name.clone(),
                url: business.url.clone(),
                description: business.site_description.clone(),
                publisher: Reference::to(format!("{}#organization", business.url)),
            },
            webpage: WebPage {
                context: CONTEXT,
                kind: "WebPage",
                id: format!("{}#webpage", meta.canonical_url),
                name: meta.title.clone(),
                description: meta.description.clone(),
                url: meta.canonical_url.clone(),
                in_language: language_tag(&meta.locale),
                is_part_of: Reference::to(website_id),
                primary_image_of_page: ImageObject {
                    kind: "ImageObject",
                    url: meta.share_image.url.clone(),
                    width: meta.share_image.width,
                    height: meta.share_image.height,
                },
            },
            breadcrumbs: BreadcrumbList::new(&request.breadcrumbs, context),
            additional: request.additional_json_ld.clone(),
        }
    }

    /// Serialized documents, one per `<script>` block.
    pub fn to_json_strings(&self) -> serde_json::Result<Vec<String>> {
        let mut out = vec![
            serde_json::to_string(&self.organization)?,
            serde_json::to_string(&self.local_business)?,
            serde_json::to_string(&self.website)?,
            serde_json::to_string(&self.webpage)?,
        ];
        if let Some(list) = &self.breadcrumbs {
            out.push(serde_json::to_string(list)?);
        }
        for doc in &self.additional {
            out.push(serde_json::to_string(doc)?);
        }
        Ok(out)
    }
}

/// `en_US` → `en-US`.
fn language_tag(locale: &str) -> String {
    locale.replace('_', "-")
}

// ============================================================================
// Documents
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub url: String,
    pub logo: String,
    pub contact_point: ContactPoint,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub area_served: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
}

impl Organization {
    fn new(business: &BusinessProfile) -> Self {
        Self {
            context: CONTEXT,
            kind: "Organization",
            id: format!("{}#organization", business.url),
            name: business.name.clone(),
            url: business.url.clone(),
            logo: business.logo.clone(),
            contact_point: ContactPoint {
                kind: "ContactPoint",
                telephone: business.telephone.clone(),
                email: business.email.clone(),
                contact_type: "customer service",
                area_served: business.country.clone(),
                available_language: "English",
            },
            area_served: business.areas_served.clone(),
            same_as: business.same_as.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub telephone: String,
    pub email: String,
    pub contact_type: &'static str,
    pub area_served: String,
    pub available_language: &'static str,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalBusiness {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub image: String,
    pub url: String,
    pub telephone: String,
    pub email: String,
    pub description: String,
    pub price_range: String,
    pub address: PostalAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinates>,
    pub area_served: Vec<AdministrativeArea>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
}

impl LocalBusiness {
    fn new(meta: &ResolvedMetadata) -> Self {
        let business = &meta.business;
        Self {
            context: CONTEXT,
            kind: "LocalBusiness",
            id: format!("{}#localbusiness", business.url),
            name: business.name.clone(),
            image: meta.share_image.url.clone(),
            url: business.url.clone(),
            telephone: business.telephone.clone(),
            email: business.email.clone(),
            description: meta.description.clone(),
            price_range: business.price_range.clone(),
            address: PostalAddress {
                kind: "PostalAddress",
                street_address: business.street.clone(),
                address_locality: business.city.clone(),
                address_region: business.state.clone(),
                postal_code: business.postal_code.clone(),
                address_country: business.country.clone(),
            },
            geo: meta
                .geo
                .position
                .as_ref()
                .map(|(lat, lng)| GeoCoordinates {
                    kind: "GeoCoordinates",
                    latitude: lat.clone(),
                    longitude: lng.clone(),
                }),
            area_served: business
                .areas_served
                .iter()
                .map(|name| AdministrativeArea {
                    kind: "AdministrativeArea",
                    name: name.clone(),
                })
                .collect(),
            same_as: business.same_as.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_locality: Option<String>,
    pub address_region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub address_country: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GeoCoordinates {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AdministrativeArea {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSite {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
    pub publisher: Reference,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPage {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub in_language: String,
    pub is_part_of: Reference,
    pub primary_image_of_page: ImageObject,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// `{"@id": ...}` node reference.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Reference {
    #[serde(rename = "@id")]
    pub id: String,
}

impl Reference {
    fn to(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbList {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub item_list_element: Vec<ListItem>,
}

impl BreadcrumbList {
    /// `None` for an empty trail.
    fn new(trail: &[Breadcrumb], context: &ResolveContext) -> Option<Self> {
        if trail.is_empty() {
            return None;
        }
        Some(Self {
            context: CONTEXT,
            kind: "BreadcrumbList",
            item_list_element: trail
                .iter()
                .enumerate()
                .map(|(index, crumb)| ListItem {
                    kind: "ListItem",
                    position: index + 1,
                    name: crumb.name.clone(),
                    item: context.absolute(&crumb.url),
                })
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: usize,
    pub name: String,
    pub item: String,
}

// ============================================================================
// Service catalog
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub provider: NamedNode,
    pub area_served: NamedNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_offer_catalog: Option<OfferCatalog>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedNode {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferCatalog {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub item_list_element: Vec<Offer>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub item_offered: NamedNode,
}

/// `Service` document for one CMS service. Untitled services yield nothing.
pub fn service_schema(service: &Service, provider: &str) -> Option<ServiceSchema> {
    let name = present(service.title.as_deref())?;
    let features: Vec<Offer> = service
        .features
        .iter()
        .filter_map(|f| present(Some(f.as_str())))
        .map(|feature| Offer {
            kind: "Offer",
            item_offered: NamedNode {
                kind: "Service",
                name: feature.to_owned(),
            },
        })
        .collect();

    Some(ServiceSchema {
        context: CONTEXT,
        kind: "Service",
        name: name.to_owned(),
        description: present(service.description.as_deref()).map(str::to_owned),
        provider: NamedNode {
            kind: "LocalBusiness",
            name: provider.to_owned(),
        },
        area_served: NamedNode {
            kind: "State",
            name: "Connecticut".to_owned(),
        },
        has_offer_catalog: (!features.is_empty()).then_some(OfferCatalog {
            kind: "OfferCatalog",
            name: "Real Estate Media Packages",
            item_list_element: features,
        }),
    })
}

/// JSON-LD values for a service list, ready for `additional_json_ld`.
pub fn service_documents(services: &[Service], provider: &str) -> serde_json::Result<Vec<Value>> {
    services
        .iter()
        .filter_map(|service| service_schema(service, provider))
        .map(|schema| serde_json::to_value(&schema))
        .collect()
}
