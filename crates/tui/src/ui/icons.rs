//! Named icon registry.
//!
//! Components refer to icons by name and never embed glyphs directly, so the
//! whole set can be swapped in one place.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use vellum_types::BackendKind;

/// Glyph drawn for names missing from the registry.
pub const FALLBACK_ICON: &str = "?";

/// Frames of the loading indicator, in order.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

static ICONS: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        ("bars", "☰"),
        ("check", "✓"),
        ("chevron-left", "‹"),
        ("clipboard", "⎘"),
        ("cog", "⚙"),
        ("desktop", "🖥"),
        ("download", "⇩"),
        ("dropbox", "◆"),
        ("edit", "✎"),
        ("file", "🗎"),
        ("file-export", "⇪"),
        ("folder", "🗀"),
        ("folder-open", "🗁"),
        ("github", "◎"),
        ("globe", "🌐"),
        ("long-arrow-alt-down", "↓"),
        ("long-arrow-alt-up", "↑"),
        ("plus", "+"),
        ("save", "💾"),
        ("spinner", "⠋"),
        ("times", "✕"),
        ("trash-alt", "🗑"),
    ])
});

/// Glyph registered under `name`.
pub fn icon(name: &str) -> &'static str {
    ICONS.get(name).copied().unwrap_or(FALLBACK_ICON)
}

/// Icon name used for a backend row.
pub fn backend_icon(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::Local => icon("folder"),
        BackendKind::CloudDrive => icon("dropbox"),
        BackendKind::SnippetHost => icon("github"),
        BackendKind::Mount => icon("folder-open"),
        BackendKind::Device => icon("desktop"),
    }
}

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_fall_back_for_unknown_names() {
        assert_eq!(icon("plus"), "+");
        assert_eq!(icon("chevron-left"), "‹");
        assert_eq!(icon("no-such-icon"), FALLBACK_ICON);
        assert_eq!(backend_icon(BackendKind::Device), icon("desktop"));
    }

    #[test]
    fn spinner_wraps_around() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len()));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }
}
