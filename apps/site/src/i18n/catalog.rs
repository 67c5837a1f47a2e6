use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::Locale;

const EN_TABLE: &str = include_str!("../../locales/en.json");
const ES_TABLE: &str = include_str!("../../locales/es.json");
const FR_TABLE: &str = include_str!("../../locales/fr.json");

/// Locale every lookup falls back to.
pub const FALLBACK_LOCALE: Locale = Locale::En;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("translation table for '{locale}' is not valid JSON: {source}")]
    Parse {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },

    #[error("translation table for '{0}' must be a JSON object")]
    NotAnObject(Locale),
}

/// Nested translation tables keyed by dotted paths (`sections.skills`).
///
/// Lookups fall back to English, then to the key itself, so a missing
/// translation renders as its key instead of failing the page.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: HashMap<Locale, Value>,
}

impl Catalog {
    /// Builds the catalog from the tables compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_sources(&[
            (Locale::En, EN_TABLE),
            (Locale::Es, ES_TABLE),
            (Locale::Fr, FR_TABLE),
        ])
    }

    pub fn from_sources(sources: &[(Locale, &str)]) -> Result<Self, CatalogError> {
        let mut tables = HashMap::new();
        for (locale, raw) in sources {
            let value: Value = serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
                locale: *locale,
                source,
            })?;
            if !value.is_object() {
                return Err(CatalogError::NotAnObject(*locale));
            }
            tables.insert(*locale, value);
        }
        Ok(Catalog { tables })
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&Value> {
        let mut node = self.tables.get(&locale)?;
        for segment in key.split('.') {
            node = node.get(segment)?;
        }
        Some(node)
    }

    fn lookup_with_fallback(&self, locale: Locale, key: &str) -> Option<&Value> {
        self.lookup(locale, key).or_else(|| {
            if locale != FALLBACK_LOCALE {
                debug!("Missing '{key}' for {locale}, falling back to {FALLBACK_LOCALE}");
            }
            self.lookup(FALLBACK_LOCALE, key)
        })
    }

    /// Translates `key`, returning the key itself when no table has it.
    pub fn t(&self, locale: Locale, key: &str) -> String {
        match self.lookup_with_fallback(locale, key) {
            Some(Value::String(s)) => s.clone(),
            _ => key.to_string(),
        }
    }

    /// Translates `key` and substitutes `{name}` style placeholders.
    pub fn t_with(&self, locale: Locale, key: &str, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .fold(self.t(locale, key), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    /// Translates a key that holds an array of strings (e.g. month names).
    pub fn t_list(&self, locale: Locale, key: &str) -> Vec<String> {
        match self.lookup_with_fallback(locale, key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Short month name for a 1-based month, e.g. `(Es, 6)` → `"jun"`.
    pub fn month_short(&self, locale: Locale, month: u32) -> Option<String> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        self.t_list(locale, "dates.months_short").into_iter().nth(index)
    }

    /// Every dotted leaf key in a locale's table, sorted.
    pub fn keys(&self, locale: Locale) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(root) = self.tables.get(&locale) {
            collect_keys(root, String::new(), &mut keys);
        }
        keys.sort();
        keys
    }
}

fn collect_keys(node: &Value, prefix: String, out: &mut Vec<String>) {
    match node {
        Value::Object(map) => {
            for (k, v) in map {
                let path = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                collect_keys(v, path, out);
            }
        }
        _ => out.push(prefix),
    }
}
