//! Theme and locale preferences.
//!
//! Both are owned by an explicit [`SiteContext`] that the page session or a
//! request handler creates and passes down; there is no global state.

pub mod cookies;
pub mod locale;
pub mod storage;
pub mod theme;

pub use cookies::CookieStore;
pub use locale::LocaleStore;
pub use storage::{MemoryStore, PreferenceStore, StorageError};
pub use theme::ThemeStore;

use crate::dom::DocumentRoot;
use crate::i18n::Locale;

/// Preference storage plus the theme and locale resolved from it.
#[derive(Debug)]
pub struct SiteContext<S: PreferenceStore> {
    store: S,
    theme: ThemeStore,
    locale: LocaleStore,
}

impl<S: PreferenceStore> SiteContext<S> {
    /// Resolves both preferences and applies them to `root`.
    pub fn init(
        store: S,
        root: &mut dyn DocumentRoot,
        browser_languages: &[String],
        default_dark: bool,
        default_locale: Locale,
    ) -> Self {
        let theme = ThemeStore::init(&store, root, default_dark);
        let locale = LocaleStore::init(&store, root, browser_languages, default_locale);
        SiteContext {
            store,
            theme,
            locale,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn locale(&self) -> Locale {
        self.locale.locale()
    }

    pub fn toggle_theme(&mut self, root: &mut dyn DocumentRoot) {
        self.theme.toggle(&mut self.store, root);
    }

    pub fn set_dark(&mut self, dark: bool, root: &mut dyn DocumentRoot) {
        self.theme.set_dark(dark, &mut self.store, root);
    }

    pub fn set_locale(&mut self, locale: Locale, root: &mut dyn DocumentRoot) {
        self.locale.set_locale(locale, &mut self.store, root);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
