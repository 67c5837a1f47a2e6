use tracing::warn;

use super::storage::{PreferenceStore, THEME_KEY};
use crate::dom::DocumentRoot;

/// Root class switching the stylesheet to its dark palette.
pub const DARK_CLASS: &str = "dark";

fn parse_theme(value: &str) -> Option<bool> {
    match value {
        "dark" => Some(true),
        "light" => Some(false),
        _ => None,
    }
}

pub fn theme_value(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

/// Light/dark preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStore {
    is_dark: bool,
}

impl ThemeStore {
    /// Reads the saved theme (falling back to `default_dark` when absent,
    /// invalid or unreadable) and applies it to the root straight away.
    pub fn init(
        store: &dyn PreferenceStore,
        root: &mut dyn DocumentRoot,
        default_dark: bool,
    ) -> Self {
        let saved = match store.get(THEME_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read theme preference: {e}");
                None
            }
        };
        let is_dark = match saved.as_deref().map(|v| (v, parse_theme(v))) {
            Some((_, Some(dark))) => dark,
            Some((raw, None)) => {
                warn!("Ignoring invalid theme preference '{raw}'");
                default_dark
            }
            None => default_dark,
        };

        let theme = ThemeStore { is_dark };
        theme.apply(root);
        theme
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn apply(&self, root: &mut dyn DocumentRoot) {
        root.set_root_class(DARK_CLASS, self.is_dark);
    }

    /// Updates state, re-applies it and persists it. A failed write is
    /// logged; the new theme stays in effect for this session.
    pub fn set_dark(
        &mut self,
        dark: bool,
        store: &mut dyn PreferenceStore,
        root: &mut dyn DocumentRoot,
    ) {
        self.is_dark = dark;
        self.apply(root);
        if let Err(e) = store.set(THEME_KEY, theme_value(dark)) {
            warn!("Could not save theme preference: {e}");
        }
    }

    pub fn toggle(&mut self, store: &mut dyn PreferenceStore, root: &mut dyn DocumentRoot) {
        self.set_dark(!self.is_dark, store, root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::RootElement;
    use crate::preferences::storage::MemoryStore;

    #[test]
    fn test_default_applies_when_nothing_saved() {
        let mut root = RootElement::default();
        let theme = ThemeStore::init(&MemoryStore::new(), &mut root, true);
        assert!(theme.is_dark());
        assert!(root.has_class(DARK_CLASS));
    }

    #[test]
    fn test_saved_value_wins_over_default() {
        let mut root = RootElement::default();
        let store = MemoryStore::new().with_value(THEME_KEY, "light");
        let theme = ThemeStore::init(&store, &mut root, true);
        assert!(!theme.is_dark());
        assert!(!root.has_class(DARK_CLASS));
    }

    #[test]
    fn test_invalid_value_falls_back() {
        let mut root = RootElement::default();
        let store = MemoryStore::new().with_value(THEME_KEY, "sepia");
        assert!(!ThemeStore::init(&store, &mut root, false).is_dark());
    }

    #[test]
    fn test_round_trip_through_reinit() {
        let mut store = MemoryStore::new();
        let mut root = RootElement::default();
        let mut theme = ThemeStore::init(&store, &mut root, false);
        theme.set_dark(true, &mut store, &mut root);

        let mut fresh_root = RootElement::default();
        let reloaded = ThemeStore::init(&store, &mut fresh_root, false);
        assert!(reloaded.is_dark());
        assert_eq!(store.raw(THEME_KEY), Some("dark"));
        assert!(fresh_root.has_class(DARK_CLASS));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut store = MemoryStore::new();
        let mut root = RootElement::default();
        let mut theme = ThemeStore::init(&store, &mut root, true);
        theme.toggle(&mut store, &mut root);
        assert!(!root.has_class(DARK_CLASS));
        assert_eq!(store.raw(THEME_KEY), Some("light"));
        theme.toggle(&mut store, &mut root);
        assert!(theme.is_dark());
        assert_eq!(store.raw(THEME_KEY), Some("dark"));
    }

    #[test]
    fn test_unavailable_storage_degrades_gracefully() {
        let mut store = MemoryStore::unavailable();
        let mut root = RootElement::default();
        let mut theme = ThemeStore::init(&store, &mut root, true);
        assert!(theme.is_dark());

        theme.toggle(&mut store, &mut root);
        assert!(!theme.is_dark(), "in-memory state still changes");
        assert!(!root.has_class(DARK_CLASS));
    }
}
