//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with what the site *contains* (business, services, pages),
//! with file paths as secondary context. Every entity follows the same
//! two-level pattern:
//!
//! 1. **Header line**: positional index + name
//! 2. **Context lines**: indented `Slug:`, `Source:`, counts
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Business
//!     Ridgeline Exteriors
//!     Phone: (555) 123-4567 (tel:5551234567)
//!
//! Services
//! 001 Roofing
//!     Slug: roofing
//!     Features: 2
//!
//! Content
//!     content.json (sha256 3f1a09c2b7de)
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! About → about/index.html
//! Contact → contact/index.html
//! Services
//!     001 Roofing → services/roofing/index.html
//! Not found → 404.html
//!
//! Generated 6 pages (2 services), copied 1 asset
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::content::Service;
use crate::generate::{GenerateReport, PageKind};
use crate::links::tel_href;
use crate::store::ContentStore;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn optional_count<T>(items: &Option<Vec<T>>) -> usize {
    items.as_ref().map_or(0, Vec::len)
}

// ============================================================================
// Check
// ============================================================================

/// Format the content inventory shown by `check`.
pub fn format_check_output(store: &ContentStore, content_path: &Path) -> Vec<String> {
    let content = store.content();
    let business = &content.business;
    let home = &content.pages.home;
    let mut lines = Vec::new();

    lines.push("Business".to_string());
    lines.push(format!("    {}", business.name));
    lines.push(format!(
        "    Phone: {} ({})",
        business.phone,
        tel_href(&business.phone)
    ));
    if let Some(email) = &business.email {
        lines.push(format!("    Email: {}", email));
    }
    lines.push(format!("    Hours: {}", plural(business.hours.len(), "line", "lines")));

    lines.push(String::new());
    lines.push("Pages".to_string());
    lines.push(format!(
        "    Home: {}, {}",
        plural(optional_count(&home.testimonials), "testimonial", "testimonials"),
        plural(optional_count(&home.trust_bar), "trust item", "trust items"),
    ));
    lines.push(format!(
        "    About: {}",
        plural(content.pages.about.paragraphs.len(), "paragraph", "paragraphs")
    ));
    let towns = content
        .pages
        .contact
        .service_area
        .as_ref()
        .map_or(0, |a| a.towns.len());
    lines.push(format!("    Contact: {}", plural(towns, "town", "towns")));

    lines.push(String::new());
    lines.push("Services".to_string());
    if content.pages.services.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, service) in content.pages.services.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), service.name));
        lines.push(format!("    Slug: {}", service.slug));
        let features = optional_count(&service.features);
        if features > 0 {
            lines.push(format!("    Features: {}", features));
        }
    }

    lines.push(String::new());
    lines.push("Content".to_string());
    let name = content_path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| content_path.display().to_string());
    lines.push(format!("    {} (sha256 {})", name, store.short_fingerprint()));

    lines
}

/// Print check output to stdout.
pub fn print_check_output(store: &ContentStore, content_path: &Path) {
    for line in format_check_output(store, content_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Show
// ============================================================================

/// Format one service, as resolved by slug.
pub fn format_service_detail(service: &Service, phone: &str) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", service.icon, service.name),
        format!("    Slug: {}", service.slug),
        format!("    Title: {}", service.seo.title),
        format!("    Headline: {}", service.headline),
        format!("    Paragraphs: {}", service.paragraphs().count()),
    ];
    for feature in service.features.iter().flatten() {
        lines.push(format!("    Feature: {}", feature.title));
    }
    lines.push(format!(
        "    CTA: {} → {}",
        service.cta.button_text,
        service.cta.resolve_href(phone)
    ));
    lines
}

/// Print one service to stdout.
pub fn print_service_detail(service: &Service, phone: &str) {
    for line in format_service_detail(service, phone) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format generate output showing written HTML files.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut service_index = 0;

    for page in &report.pages {
        match page.kind {
            PageKind::Home => lines.push(format!("Home \u{2192} {}", page.path)),
            PageKind::About => lines.push(format!("About \u{2192} {}", page.path)),
            PageKind::Contact => lines.push(format!("Contact \u{2192} {}", page.path)),
            PageKind::Service => {
                if service_index == 0 {
                    lines.push("Services".to_string());
                }
                service_index += 1;
                lines.push(format!(
                    "    {} {} \u{2192} {}",
                    format_index(service_index),
                    page.title,
                    page.path
                ));
            }
            PageKind::NotFound => lines.push(format!("Not found \u{2192} {}", page.path)),
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} ({}), copied {}",
        plural(report.pages.len(), "page", "pages"),
        plural(service_index, "service", "services"),
        plural(report.assets_copied, "asset", "assets"),
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}
