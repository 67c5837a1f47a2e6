use tracing::{debug, warn};

use super::storage::{PreferenceStore, LOCALE_KEY};
use crate::dom::DocumentRoot;
use crate::i18n::Locale;

/// Active interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleStore {
    locale: Locale,
}

impl LocaleStore {
    /// Resolves the locale: saved value, then the first supported browser
    /// language (matched on its primary subtag), then `default`. The result
    /// is applied as the document `lang`.
    pub fn init(
        store: &dyn PreferenceStore,
        root: &mut dyn DocumentRoot,
        browser_languages: &[String],
        default: Locale,
    ) -> Self {
        let saved = match store.get(LOCALE_KEY) {
            Ok(Some(code)) => {
                let locale = Locale::from_code(&code);
                if locale.is_none() {
                    warn!("Ignoring unsupported saved locale '{code}'");
                }
                locale
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read locale preference: {e}");
                None
            }
        };

        let locale = saved
            .or_else(|| {
                let detected = browser_languages
                    .iter()
                    .find_map(|tag| Locale::from_language_tag(tag));
                if let Some(locale) = detected {
                    debug!("Locale {locale} detected from browser languages");
                }
                detected
            })
            .unwrap_or(default);

        let store = LocaleStore { locale };
        store.apply(root);
        store
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn apply(&self, root: &mut dyn DocumentRoot) {
        root.set_lang(self.locale.code());
    }

    pub fn set_locale(
        &mut self,
        locale: Locale,
        store: &mut dyn PreferenceStore,
        root: &mut dyn DocumentRoot,
    ) {
        self.locale = locale;
        self.apply(root);
        if let Err(e) = store.set(LOCALE_KEY, locale.code()) {
            warn!("Could not save locale preference: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::RootElement;
    use crate::preferences::storage::MemoryStore;

    fn langs(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_browser_region_tag_matches_primary_subtag() {
        let mut root = RootElement::default();
        let browser = langs(&["fr-FR", "en"]);
        let store = LocaleStore::init(&MemoryStore::new(), &mut root, &browser, Locale::En);
        assert_eq!(store.locale(), Locale::Fr);
        assert_eq!(root.lang.as_deref(), Some("fr"));
    }

    #[test]
    fn test_saved_locale_beats_browser() {
        let mut root = RootElement::default();
        let saved = MemoryStore::new().with_value(LOCALE_KEY, "es");
        let store = LocaleStore::init(&saved, &mut root, &langs(&["fr-FR"]), Locale::En);
        assert_eq!(store.locale(), Locale::Es);
    }

    #[test]
    fn test_skips_unsupported_browser_languages() {
        let mut root = RootElement::default();
        let store = LocaleStore::init(
            &MemoryStore::new(),
            &mut root,
            &langs(&["de-DE", "pt", "es-MX"]),
            Locale::En,
        );
        assert_eq!(store.locale(), Locale::Es);
    }

    #[test]
    fn test_falls_back_to_default() {
        let mut root = RootElement::default();
        let bogus = MemoryStore::new().with_value(LOCALE_KEY, "klingon");
        let store = LocaleStore::init(&bogus, &mut root, &langs(&["ja"]), Locale::Fr);
        assert_eq!(store.locale(), Locale::Fr);
        assert_eq!(root.lang.as_deref(), Some("fr"));
    }

    #[test]
    fn test_set_locale_persists_and_applies() {
        let mut storage = MemoryStore::new();
        let mut root = RootElement::default();
        let mut store = LocaleStore::init(&storage, &mut root, &[], Locale::En);
        store.set_locale(Locale::Es, &mut storage, &mut root);

        assert_eq!(storage.raw(LOCALE_KEY), Some("es"));
        assert_eq!(root.lang.as_deref(), Some("es"));
        let reloaded = LocaleStore::init(&storage, &mut RootElement::default(), &[], Locale::En);
        assert_eq!(reloaded.locale(), Locale::Es);
    }

    #[test]
    fn test_unavailable_storage_uses_browser_then_default() {
        let mut storage = MemoryStore::unavailable();
        let mut root = RootElement::default();
        let mut store = LocaleStore::init(&storage, &mut root, &langs(&["es"]), Locale::En);
        assert_eq!(store.locale(), Locale::Es);
        store.set_locale(Locale::Fr, &mut storage, &mut root);
        assert_eq!(store.locale(), Locale::Fr);
    }
}
