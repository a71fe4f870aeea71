//! # Storefront
//!
//! A static site generator for small-business marketing sites. One JSON
//! content document holds every business fact and every line of copy; the
//! generator turns it into a home page, an about page, a contact page and one
//! page per service.
//!
//! # Architecture: Load Once, Render Everything
//!
//! ```text
//! 1. Load      content.json  →  ContentStore   (parse + validate, then immutable)
//! 2. Generate  ContentStore  →  dist/          (maud templates, one file per route)
//! ```
//!
//! The store is the only source of page data. Renderers reach it through three
//! accessors: the whole document, a service by slug, and the list of service
//! slugs (which fixes the set of service pages to generate).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Typed content document and its load-time validation |
//! | [`store`] | Immutable shared store, accessors, process-wide install |
//! | [`links`] | Dial-able phone strings, `tel:`/`mailto:` hrefs, CTA fallbacks |
//! | [`icons`] | Trust bar icon key → glyph table |
//! | [`structured_data`] | schema.org JSON-LD for the page head |
//! | [`config`] | Optional `config.toml`: paths, theme, parallelism |
//! | [`generate`] | HTML rendering with Maud and the output tree |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Absent Means Omitted
//!
//! Optional content blocks are `Option`s, and renderers skip the section when
//! the block is absent or an empty list. The only fallback anywhere is a CTA
//! button without a link, which dials the business phone.
//!
//! ## Strict Loading
//!
//! Unknown keys, duplicate service slugs and dangling service references fail
//! the load. A typo in the content file stops the build instead of producing a
//! page with a missing section or a dead link.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error, interpolation is escaped, and there is no template
//! directory to ship.

pub mod config;
pub mod content;
pub mod generate;
pub mod icons;
pub mod links;
pub mod output;
pub mod store;
pub mod structured_data;

pub use store::{ContentStore, get_all_service_slugs, get_content, get_service, load_content};

#[cfg(test)]
pub(crate) mod test_helpers;
