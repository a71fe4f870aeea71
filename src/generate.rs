//! HTML site generation.
//!
//! Renders the content store into a static site. Every page shares one
//! layout (head with SEO metadata and JSON-LD, header, footer); the page
//! body is a direct projection of the matching content block.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, trust bar, services grid, about preview,
//!   testimonials, closing CTA
//! - **About** (`/about/index.html`): story paragraphs, "why choose us" grid
//! - **Contact** (`/contact/index.html`): contact card, message form, service area
//! - **Service pages** (`/services/{slug}/index.html`): one per service slug
//! - **Not found** (`/404.html`): served by the host for unknown routes
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── about/index.html
//! ├── contact/index.html
//! ├── services/
//! │   ├── roofing/index.html
//! │   └── siding/index.html
//! └── favicon.ico               # Copied from the assets directory
//! ```
//!
//! Assets are copied after the pages. An asset whose top-level name is a
//! generated route (`index.html`, `404.html`, `about`, `contact`,
//! `services`) fails the build before anything is written.
//!
//! ## Optional Sections
//!
//! A section backed by an optional content block is rendered only when the
//! block is present and, for lists, non-empty. There is no placeholder
//! markup for missing content.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated content is escaped. The stylesheet is embedded at compile
//! time and inlined into every page along with the generated `:root` block.
//! Service pages are rendered in parallel on the rayon pool.

use crate::config::{self, SiteConfig};
use crate::content::{MAX_RATING, PageSeo, Service, SiteContent};
use crate::icons::trust_icon;
use crate::links::{mailto_href, service_path, tel_href};
use crate::store::ContentStore;
use crate::structured_data;
use chrono::Datelike;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Asset path escapes the assets directory: {0}")]
    AssetPath(PathBuf),
    #[error("Asset {0} collides with a generated page")]
    AssetConflict(PathBuf),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// What kind of page an output file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    About,
    Contact,
    Service,
    NotFound,
}

/// One written HTML file.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub kind: PageKind,
    pub title: String,
    /// Path relative to the output directory.
    pub path: String,
}

/// Summary of a generate run, consumed by [`crate::output`].
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Pages in a fixed order: home, about, contact, services (document order), 404.
    pub pages: Vec<GeneratedPage>,
    pub assets_copied: usize,
}

impl GenerateReport {
    pub fn service_pages(&self) -> impl Iterator<Item = &GeneratedPage> {
        self.pages.iter().filter(|p| p.kind == PageKind::Service)
    }
}

/// Shared render context: everything the layout needs besides the page body.
pub struct Layout<'a> {
    pub content: &'a SiteContent,
    pub lang: &'a str,
    css: String,
    json_ld: String,
    year: i32,
    phone_href: String,
}

impl<'a> Layout<'a> {
    pub fn new(content: &'a SiteContent, config: &'a SiteConfig, year: i32) -> Self {
        let theme_css = config::generate_theme_css(&content.design, config);
        let json_ld = structured_data::business_json_ld(
            &content.business,
            content.seo.json_ld.as_ref(),
        );
        Self {
            content,
            lang: &config.lang,
            css: format!("{}\n\n{}", theme_css, CSS_STATIC),
            json_ld: structured_data::to_script_body(&json_ld),
            year,
            phone_href: tel_href(&content.business.phone),
        }
    }
}

/// Render the whole site into `output_dir`.
///
/// Static assets are copied from `source_dir/<assets_dir>` when that
/// directory exists. The footer year is the current local year.
pub fn generate(
    store: &ContentStore,
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let year = chrono::Local::now().year();
    generate_with_year(store, config, source_dir, output_dir, year)
}

/// [`generate`] with an explicit footer year.
pub fn generate_with_year(
    store: &ContentStore,
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
    year: i32,
) -> Result<GenerateReport, GenerateError> {
    let content = store.content();
    let layout = Layout::new(content, config, year);
    let pages = &content.pages;

    // Scanned up front so a colliding asset fails the build before any write.
    let assets = source_dir.join(&config.assets_dir);
    let asset_files = if assets.is_dir() {
        collect_assets(&assets)?
    } else {
        Vec::new()
    };

    fs::create_dir_all(output_dir)?;
    let mut report = GenerateReport::default();

    report.pages.push(write_page(
        output_dir,
        "index.html",
        PageKind::Home,
        &pages.home.seo.title,
        render_home(&layout),
    )?);
    report.pages.push(write_page(
        output_dir,
        "about/index.html",
        PageKind::About,
        &pages.about.seo.title,
        render_about(&layout),
    )?);
    report.pages.push(write_page(
        output_dir,
        "contact/index.html",
        PageKind::Contact,
        &pages.contact.seo.title,
        render_contact(&layout),
    )?);

    // One page per slug, exactly the set the store enumerates.
    let service_pages = store
        .service_slugs()
        .par_iter()
        .filter_map(|slug| store.service(slug))
        .map(|service| {
            write_page(
                output_dir,
                &format!("services/{}/index.html", service.slug),
                PageKind::Service,
                &service.seo.title,
                render_service(&layout, service),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    report.pages.extend(service_pages);

    report.pages.push(write_page(
        output_dir,
        "404.html",
        PageKind::NotFound,
        NOT_FOUND_TITLE,
        render_not_found(&layout),
    )?);

    report.assets_copied = copy_assets(&assets, &asset_files, output_dir)?;

    Ok(report)
}

fn write_page(
    output_dir: &Path,
    rel_path: &str,
    kind: PageKind,
    title: &str,
    markup: Markup,
) -> Result<GeneratedPage, GenerateError> {
    let path = output_dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, markup.into_string())?;
    Ok(GeneratedPage {
        kind,
        title: title.to_string(),
        path: rel_path.to_string(),
    })
}

/// Top-level output names owned by generated pages.
const GENERATED_ROOTS: &[&str] = &["index.html", "404.html", "about", "contact", "services"];

/// Relative paths of every file under `src`, sorted by name.
///
/// Fails on any path whose first component is a generated route.
fn collect_assets(src: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| GenerateError::AssetPath(entry.path().to_path_buf()))?
            .to_path_buf();
        let collides = rel
            .components()
            .next()
            .is_some_and(|first| GENERATED_ROOTS.iter().any(|r| first.as_os_str() == *r));
        if collides {
            return Err(GenerateError::AssetConflict(rel));
        }
        if !entry.file_type().is_dir() {
            files.push(rel);
        }
    }
    Ok(files)
}

/// Copy `files` (relative to `src`) into `dst`.
fn copy_assets(src: &Path, files: &[PathBuf], dst: &Path) -> Result<usize, GenerateError> {
    for rel in files {
        let target = dst.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src.join(rel), &target)?;
    }
    Ok(files.len())
}

// ============================================================================
// HTML Components
// ============================================================================

const NOT_FOUND_TITLE: &str = "Page Not Found";

/// Renders the base HTML document: head metadata, header, main, footer.
fn base_document(layout: &Layout, seo: &PageSeo, content: Markup) -> Markup {
    let keywords = seo
        .keywords
        .as_ref()
        .or(layout.content.seo.keywords.as_ref())
        .filter(|k| !k.is_empty())
        .map(|k| k.join(", "));

    html! {
        (DOCTYPE)
        html lang=(layout.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (seo.title) }
                meta name="description" content=(seo.description);
                @if let Some(keywords) = keywords {
                    meta name="keywords" content=(keywords);
                }
                style { (PreEscaped(&layout.css)) }
                script type="application/ld+json" { (PreEscaped(&layout.json_ld)) }
            }
            body {
                (site_header(layout))
                main { (content) }
                (site_footer(layout))
            }
        }
    }
}

const NAV: &[(&str, &str)] = &[
    ("Home", "/"),
    ("Services", "/#services"),
    ("About", "/about/"),
    ("Contact", "/contact/"),
];

/// Renders the sticky header. The mobile menu is a CSS checkbox toggle.
fn site_header(layout: &Layout) -> Markup {
    let business = &layout.content.business;
    html! {
        header.site-header {
            div.container.header-row {
                a.brand href="/" { (business.name) }
                input.nav-toggle type="checkbox" id="nav-toggle";
                label.nav-hamburger for="nav-toggle" aria-label="Toggle menu" {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
                nav.site-nav {
                    @for (label, href) in NAV {
                        a href=(href) { (label) }
                    }
                    a.button.button-accent href=(layout.phone_href) { (business.phone) }
                }
            }
        }
    }
}

fn site_footer(layout: &Layout) -> Markup {
    let business = &layout.content.business;
    html! {
        footer.site-footer {
            div.container.footer-grid {
                div {
                    h3 { (business.name) }
                    p.muted { (business.address) }
                    @for line in &business.hours {
                        p.muted { (line) }
                    }
                }
                div {
                    h4 { "Services" }
                    ul {
                        @for service in &layout.content.pages.services {
                            li { a href=(service_path(&service.slug)) { (service.name) } }
                        }
                    }
                }
                div {
                    h4 { "Quick Links" }
                    ul {
                        li { a href="/" { "Home" } }
                        li { a href="/about/" { "About Us" } }
                        li { a href="/contact/" { "Contact" } }
                    }
                }
                div {
                    h4 { "Contact Us" }
                    a.block href=(layout.phone_href) { (business.phone) }
                    @if let Some(email) = &business.email {
                        a.block href=(mailto_href(email)) { (email) }
                    }
                }
            }
            div.container.copyright {
                "© " (layout.year) " " (business.name) ". All rights reserved."
            }
        }
    }
}

/// Closing band used by several pages: headline, optional copy, one button.
fn cta_band(headline: &str, description: Option<&str>, button_text: &str, href: &str) -> Markup {
    html! {
        section.band.band-primary.centered {
            div.container {
                h2 { (headline) }
                @if let Some(description) = description {
                    p.lead { (description) }
                }
                a.button.button-accent href=(href) { (button_text) }
            }
        }
    }
}

/// Star string for a testimonial: filled stars, then empty ones up to five.
pub fn rating_stars(rating: u8) -> String {
    let filled = rating.min(MAX_RATING) as usize;
    let empty = (MAX_RATING as usize) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// `Some` only for a present, non-empty list.
fn non_empty<T>(items: &Option<Vec<T>>) -> Option<&[T]> {
    items.as_deref().filter(|items| !items.is_empty())
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page.
pub fn render_home(layout: &Layout) -> Markup {
    let home = &layout.content.pages.home;
    let hero = &home.hero;
    let phone = &layout.content.business.phone;

    let content = html! {
        section.band.band-primary.hero {
            div.container {
                h1 { (hero.headline) }
                p.lead { (hero.subheadline) }
                div.button-row {
                    a.button.button-accent href=(hero.cta_primary.href) { (hero.cta_primary.text) }
                    a.button.button-ghost href=(hero.cta_secondary.href) { (hero.cta_secondary.text) }
                }
                @if let Some(stats) = non_empty(&hero.stats) {
                    div.stats {
                        @for stat in stats {
                            div.stat {
                                p.stat-value { (stat.value) }
                                p.stat-label { (stat.label) }
                            }
                        }
                    }
                }
            }
        }

        @if let Some(items) = non_empty(&home.trust_bar) {
            section.trust-bar {
                div.container.trust-row {
                    @for item in items {
                        div.trust-item {
                            span { (trust_icon(&item.icon)) }
                            span { (item.text) }
                        }
                    }
                }
            }
        }

        section.band id="services" {
            div.container {
                h2.centered { "Our Services" }
                div.card-grid {
                    @for summary in &home.services_summary {
                        a.card.service-card href=(service_path(&summary.slug)) {
                            span.icon { (summary.icon) }
                            h3 { (summary.name) }
                            p.muted { (summary.description) }
                            span.more { "Learn More →" }
                        }
                    }
                }
            }
        }

        @if let Some(preview) = &home.about_preview {
            section.band.band-surface.about-preview {
                div.container.narrow.centered {
                    h2 { (preview.headline) }
                    p.muted { (preview.text) }
                    a.more href=(preview.link) { "Read More →" }
                }
            }
        }

        @if let Some(testimonials) = non_empty(&home.testimonials) {
            section.band.testimonials {
                div.container {
                    h2.centered { "What Our Customers Say" }
                    div.card-grid {
                        @for t in testimonials {
                            figure.card.testimonial {
                                div.stars aria-label={ (t.rating) " out of 5" } { (rating_stars(t.rating)) }
                                blockquote { "“" (t.text) "”" }
                                figcaption { (t.author) }
                            }
                        }
                    }
                }
            }
        }

        (cta_band(
            &home.cta.headline,
            Some(&home.cta.description),
            &home.cta.button_text,
            &home.cta.resolve_href(phone),
        ))
    };

    base_document(layout, &home.seo, content)
}

/// Renders the about page.
pub fn render_about(layout: &Layout) -> Markup {
    let about = &layout.content.pages.about;
    let business = &layout.content.business;

    let content = html! {
        section.band.band-primary.page-hero {
            div.container {
                h1 { (about.headline) }
            }
        }

        section.band {
            div.container.narrow.prose {
                @for paragraph in &about.paragraphs {
                    p { (paragraph) }
                }
            }
        }

        @if let Some(items) = non_empty(&about.why_choose_us) {
            section.band.band-surface.why-choose-us {
                div.container {
                    h2.centered { "Why Choose " (business.name) }
                    div.card-grid.four {
                        @for item in items {
                            div.card.centered {
                                span.icon { (item.icon) }
                                h3 { (item.title) }
                                p.muted { (item.description) }
                            }
                        }
                    }
                }
            }
        }

        (cta_band(
            "Ready to Work Together?",
            Some("Contact us today for a free consultation."),
            &format!("Call {}", business.phone),
            &layout.phone_href,
        ))
    };

    base_document(layout, &about.seo, content)
}

/// Renders the contact page. The form has no backend.
pub fn render_contact(layout: &Layout) -> Markup {
    let contact = &layout.content.pages.contact;
    let business = &layout.content.business;

    let content = html! {
        section.band.band-primary.page-hero {
            div.container {
                h1 { (contact.headline) }
                p.lead { (contact.description) }
            }
        }

        section.band {
            div.container.two-column {
                div.stack {
                    div.card.contact-card {
                        h2 { "Get In Touch" }
                        dl {
                            dt { "📞 Phone" }
                            dd { a href=(layout.phone_href) { (business.phone) } }
                            @if let Some(email) = &business.email {
                                dt { "📧 Email" }
                                dd { a href=(mailto_href(email)) { (email) } }
                            }
                            dt { "📍 Address" }
                            dd { (business.address) }
                            dt { "🕐 Hours" }
                            dd {
                                @for line in &business.hours {
                                    span.block { (line) }
                                }
                            }
                        }
                    }
                    div.card.band-primary.centered.quick-call {
                        h3 { "Need Immediate Help?" }
                        p { "Call us now for fast, reliable service." }
                        a.button.button-accent href=(layout.phone_href) { "Call " (business.phone) }
                    }
                }

                div.card {
                    h2 { "Send Us a Message" }
                    form.contact-form {
                        label for="name" { "Full Name" }
                        input id="name" type="text" name="name" placeholder="John Smith";
                        label for="email" { "Email" }
                        input id="email" type="email" name="email" placeholder="john@example.com";
                        label for="phone" { "Phone" }
                        input id="phone" type="tel" name="phone" placeholder="(555) 123-4567";
                        label for="message" { "Message" }
                        textarea id="message" name="message" rows="4" placeholder="Tell us about your project..." {}
                        button.button.button-accent type="submit" { "Send Message" }
                    }
                }
            }
        }

        @if let Some(area) = &contact.service_area {
            section.band.band-surface.service-area {
                div.container {
                    h2 { (area.headline) }
                    p.muted { (area.description) }
                    div.chips {
                        @for town in &area.towns {
                            span.chip { (town) }
                        }
                    }
                }
            }
        }
    };

    base_document(layout, &contact.seo, content)
}

/// Renders one service page.
pub fn render_service(layout: &Layout, service: &Service) -> Markup {
    let phone = &layout.content.business.phone;
    let others = layout
        .content
        .pages
        .services
        .iter()
        .filter(|s| s.slug != service.slug);

    let content = html! {
        nav.breadcrumb aria-label="Breadcrumb" {
            div.container {
                a href="/" { "Home" }
                " / "
                a href="/#services" { "Services" }
                " / "
                span.current { (service.name) }
            }
        }

        section.band.band-primary.page-hero {
            div.container {
                h1 { (service.headline) }
                a.button.button-accent href=(layout.phone_href) { "Get a Free Estimate" }
            }
        }

        section.band {
            div.container.narrow {
                div.prose {
                    @for paragraph in service.paragraphs() {
                        p { (paragraph) }
                    }
                }
                @if let Some(features) = non_empty(&service.features) {
                    div.features {
                        h2 { "What We Offer" }
                        div.card-grid.two {
                            @for feature in features {
                                div.card.band-surface {
                                    h3 { (feature.title) }
                                    p.muted { (feature.description) }
                                }
                            }
                        }
                    }
                }
            }
        }

        (cta_band(
            &service.cta.headline,
            None,
            &service.cta.button_text,
            &service.cta.resolve_href(phone),
        ))

        section.band.other-services {
            div.container {
                h2 { "Other Services" }
                div.chips {
                    @for other in others {
                        a.chip href=(service_path(&other.slug)) { (other.name) }
                    }
                }
            }
        }
    };

    base_document(layout, &service.seo, content)
}

/// Renders the 404 page, listing every service as a way back in.
pub fn render_not_found(layout: &Layout) -> Markup {
    let seo = PageSeo {
        title: format!("{} | {}", NOT_FOUND_TITLE, layout.content.business.name),
        description: layout.content.seo.site_description.clone(),
        keywords: None,
    };

    let content = html! {
        section.band.band-primary.page-hero {
            div.container {
                h1 { (NOT_FOUND_TITLE) }
                p.lead { "The page you were looking for doesn't exist." }
                a.button.button-accent href="/" { "Back to Home" }
            }
        }
        @if !layout.content.pages.services.is_empty() {
            section.band {
                div.container {
                    h2 { "Our Services" }
                    div.chips {
                        @for service in &layout.content.pages.services {
                            a.chip href=(service_path(&service.slug)) { (service.name) }
                        }
                    }
                }
            }
        }
    };

    base_document(layout, &seo, content)
}

// ============================================================================
// Tests
// ============================================================================
