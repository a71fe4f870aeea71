//! Trust bar icon keys.
//!
//! Content authors name icons by key (`"shield"`, `"clock"`). Unknown keys
//! render as a plain check mark instead of failing the build.

/// Glyph shown for icon keys not in [`TRUST_ICONS`].
pub const DEFAULT_ICON: &str = "✓";

/// Known trust bar icon keys and their glyphs.
pub const TRUST_ICONS: &[(&str, &str)] = &[
    ("shield", "🛡️"),
    ("clock", "⏰"),
    ("award", "🏆"),
    ("check", "✅"),
    ("star", "⭐"),
    ("phone", "📞"),
    ("tools", "🔧"),
    ("home", "🏠"),
];

/// Glyph for an icon key. Total: unknown keys map to [`DEFAULT_ICON`].
pub fn trust_icon(key: &str) -> &'static str {
    TRUST_ICONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(DEFAULT_ICON)
}
