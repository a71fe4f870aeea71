//! Content document schema and loading.
//!
//! The whole site is described by one JSON file (`content.json` by default).
//! This module defines its typed shape and the load step that turns the file
//! into a validated [`SiteContent`].
//!
//! ## Document Layout
//!
//! ```text
//! {
//!   "business": { name, phone, email?, address, hours[] },
//!   "seo":      { siteTitle, siteDescription, keywords?, jsonLd? },
//!   "design":   { primaryColor, accentColor },
//!   "pages": {
//!     "home":     { seo, hero, trustBar?, servicesSummary[], aboutPreview?, testimonials?, cta },
//!     "about":    { seo, headline, paragraphs[], whyChooseUs? },
//!     "contact":  { seo, headline, description, serviceArea? },
//!     "services": [ { slug, name, icon, shortDescription, headline, description, features?, cta, seo } ]
//!   }
//! }
//! ```
//!
//! ## Optional Fields
//!
//! Every optional block is an `Option`. Absent means the page omits the
//! corresponding section; the loader never fills in defaults. The one named
//! fallback (a CTA without `buttonHref` links to the business phone) lives in
//! [`crate::links`].
//!
//! ## Validation
//!
//! Loading fails fast on the first violation:
//! - Unknown keys and missing required fields (serde)
//! - Empty or non URL-safe service slugs
//! - Duplicate service slugs
//! - `servicesSummary` entries naming a service that does not exist
//! - Design colors that are not plain CSS values (`<`, `>`, `{`, `}`, `;`)
//! - Testimonial ratings above 5

use crate::config::is_plain_css_value;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate service slug: {0}")]
    DuplicateSlug(String),
    #[error("Invalid service slug {0:?}: use ASCII letters, digits, '-' or '_'")]
    InvalidSlug(String),
    #[error("servicesSummary references unknown service: {0}")]
    UnknownSummarySlug(String),
    #[error("Content validation error: {0}")]
    Validation(String),
    #[error("Content store is already loaded")]
    AlreadyLoaded,
}

/// Root of the content document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteContent {
    pub business: Business,
    pub seo: SiteSeo,
    pub design: Design,
    pub pages: Pages,
}

/// Business facts shown in the header, footer and contact page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Business {
    pub name: String,
    /// Display form, e.g. `"(555) 123-4567"`. See [`crate::links::dial_digits`].
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: String,
    /// Opening hours, one display line per entry.
    pub hours: Vec<String>,
}

/// Brand colors, emitted as `--site-primary` / `--site-accent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Design {
    pub primary_color: String,
    pub accent_color: String,
}

/// Site-wide SEO defaults used by the shared layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteSeo {
    pub site_title: String,
    pub site_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_ld: Option<JsonLd>,
}

/// Per-page title and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageSeo {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

/// Optional schema.org business description. Every field stands alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JsonLd {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_rating: Option<AggregateRating>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostalAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AggregateRating {
    pub rating_value: f64,
    pub review_count: u32,
}

/// Per-page content blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Pages {
    pub home: HomePage,
    pub about: AboutPage,
    pub contact: ContactPage,
    /// Ordered, slug-unique. Document order drives navigation and page generation.
    pub services: Vec<Service>,
}

/// One service offering, rendered at `/services/{slug}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Service {
    /// Stable URL segment and lookup key.
    pub slug: String,
    pub name: String,
    pub icon: String,
    pub short_description: String,
    pub headline: String,
    /// Body text; paragraphs are separated by a blank line.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Feature>>,
    pub cta: Cta,
    pub seo: PageSeo,
}

impl Service {
    /// Description split into paragraphs on blank lines.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.description
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

/// Call-to-action button block. `button_href` falls back to the phone link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Cta {
    pub headline: String,
    pub button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HomePage {
    pub seo: PageSeo,
    pub hero: Hero,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_bar: Option<Vec<TrustItem>>,
    pub services_summary: Vec<ServiceSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_preview: Option<AboutPreview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonials: Option<Vec<Testimonial>>,
    pub cta: HomeCta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Hero {
    pub headline: String,
    pub subheadline: String,
    pub cta_primary: Link,
    pub cta_secondary: Link,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<Stat>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

/// Trust bar entry. `icon` is a key into [`crate::icons::trust_icon`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrustItem {
    pub icon: String,
    pub text: String,
}

/// Home page card for a service. `slug` must name an entry of `pages.services`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSummary {
    pub slug: String,
    pub name: String,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AboutPreview {
    pub headline: String,
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    /// Star rating, 0 to [`MAX_RATING`].
    pub rating: u8,
    pub text: String,
    pub author: String,
}

pub const MAX_RATING: u8 = 5;

/// Closing call-to-action on the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HomeCta {
    pub headline: String,
    pub description: String,
    pub button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AboutPage {
    pub seo: PageSeo,
    pub headline: String,
    pub paragraphs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_choose_us: Option<Vec<WhyItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhyItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactPage {
    pub seo: PageSeo,
    pub headline: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_area: Option<ServiceArea>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceArea {
    pub headline: String,
    pub description: String,
    pub towns: Vec<String>,
}

impl SiteContent {
    /// Parse and validate a document held in memory.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let content: SiteContent = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ContentError> {
        for (key, value) in [
            ("primaryColor", &self.design.primary_color),
            ("accentColor", &self.design.accent_color),
        ] {
            if !is_plain_css_value(value) {
                return Err(ContentError::Validation(format!(
                    "design.{key} is not a plain CSS value: {value:?}"
                )));
            }
        }

        let mut seen = HashSet::new();
        for service in &self.pages.services {
            if !is_url_safe_slug(&service.slug) {
                return Err(ContentError::InvalidSlug(service.slug.clone()));
            }
            if !seen.insert(service.slug.as_str()) {
                return Err(ContentError::DuplicateSlug(service.slug.clone()));
            }
        }

        for summary in &self.pages.home.services_summary {
            if !seen.contains(summary.slug.as_str()) {
                return Err(ContentError::UnknownSummarySlug(summary.slug.clone()));
            }
        }

        for testimonial in self.pages.home.testimonials.iter().flatten() {
            if testimonial.rating > MAX_RATING {
                return Err(ContentError::Validation(format!(
                    "testimonial rating by {} must be 0-{MAX_RATING}, got {}",
                    testimonial.author, testimonial.rating
                )));
            }
        }

        Ok(())
    }
}

fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Read, parse and validate a content document from disk.
///
/// Returns the parsed document along with the raw bytes it came from (the
/// store fingerprints them).
pub fn read_content(path: &Path) -> Result<(SiteContent, Vec<u8>), ContentError> {
    let raw = fs::read(path)?;
    let content: SiteContent = serde_json::from_slice(&raw)?;
    content.validate()?;
    Ok((content, raw))
}
