//! Read-only content store and its accessors.
//!
//! A [`ContentStore`] owns the validated document behind an `Arc`, so clones
//! are cheap and every clone sees the same data. Nothing hands out a mutable
//! reference; the document is fixed for the lifetime of the process.
//!
//! Two ways to use it:
//!
//! - **Handle**: pass a `ContentStore` (or `&ContentStore`) to whoever renders.
//!   The generator does this.
//! - **Global**: [`install`] the store once at startup, then call
//!   [`get_content`], [`get_service`] and [`get_all_service_slugs`] from
//!   anywhere. Backed by a `OnceLock`; there is no reload.
//!
//! ```text
//! load_content(path) ──▶ ContentStore ──install──▶ STORE (OnceLock)
//!                             │
//!         content() / service(slug) / service_slugs()
//! ```

use crate::content::{self, ContentError, Service, SiteContent};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::{Arc, OnceLock};

static STORE: OnceLock<ContentStore> = OnceLock::new();

/// Shared, immutable handle to the loaded content document.
#[derive(Debug, Clone)]
pub struct ContentStore {
    content: Arc<SiteContent>,
    fingerprint: String,
}

impl ContentStore {
    /// Wrap an already-validated document.
    ///
    /// The fingerprint is derived from the canonical JSON serialization.
    pub fn new(content: SiteContent) -> Result<Self, ContentError> {
        content.validate()?;
        let canonical = serde_json::to_vec(&content)?;
        Ok(Self {
            fingerprint: fingerprint(&canonical),
            content: Arc::new(content),
        })
    }

    /// Parse, validate and wrap a document held in memory.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let content = SiteContent::from_json(json)?;
        Ok(Self {
            fingerprint: fingerprint(json.as_bytes()),
            content: Arc::new(content),
        })
    }

    /// The entire document, unchanged. Same reference on every call.
    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    /// First service whose slug equals `slug` exactly (case-sensitive).
    ///
    /// `None` is an ordinary outcome: callers map it to "page not found".
    pub fn service(&self, slug: &str) -> Option<&Service> {
        self.content.pages.services.iter().find(|s| s.slug == slug)
    }

    /// Every service slug, in document order.
    pub fn service_slugs(&self) -> Vec<&str> {
        self.content
            .pages
            .services
            .iter()
            .map(|s| s.slug.as_str())
            .collect()
    }

    /// SHA-256 of the document bytes, hex-encoded.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// First 12 hex digits of the fingerprint, for display.
    pub fn short_fingerprint(&self) -> &str {
        &self.fingerprint[..12]
    }
}

fn fingerprint(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Load a content document from disk into a store.
///
/// Any failure here is fatal to a build: there is no partial document.
pub fn load_content(path: &Path) -> Result<ContentStore, ContentError> {
    let (content, raw) = content::read_content(path)?;
    Ok(ContentStore {
        fingerprint: fingerprint(&raw),
        content: Arc::new(content),
    })
}

// =============================================================================
// Process-wide store
// =============================================================================

/// Install `store` as the process-wide content store.
///
/// Succeeds once. A second call returns [`ContentError::AlreadyLoaded`] and
/// leaves the first store in place.
pub fn install(store: ContentStore) -> Result<&'static ContentStore, ContentError> {
    STORE.set(store).map_err(|_| ContentError::AlreadyLoaded)?;
    Ok(global())
}

/// The installed store, if any.
pub fn try_global() -> Option<&'static ContentStore> {
    STORE.get()
}

/// The installed store.
///
/// # Panics
///
/// Panics if called before [`install`]. Loading happens at startup, so this
/// is a programming error rather than a runtime condition.
pub fn global() -> &'static ContentStore {
    STORE.get().expect("content store accessed before install()")
}

/// Whole document from the installed store.
pub fn get_content() -> &'static SiteContent {
    global().content()
}

/// Whole document, or `None` when nothing is installed yet.
pub fn try_get_content() -> Option<&'static SiteContent> {
    try_global().map(ContentStore::content)
}

/// Service lookup against the installed store.
pub fn get_service(slug: &str) -> Option<&'static Service> {
    global().service(slug)
}

/// Service slugs of the installed store, in document order.
pub fn get_all_service_slugs() -> Vec<&'static str> {
    global().service_slugs()
}
