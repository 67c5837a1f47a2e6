//! Supported locales, browser-language matching and the translation catalog.

pub mod catalog;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Es,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Es, Locale::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Fr => "fr",
        }
    }

    /// Parses an exact locale code (`"es"`), case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Locale::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code))
    }

    /// Matches a BCP 47 language tag on its primary subtag: `fr-FR` → `fr`.
    pub fn from_language_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?;
        Locale::from_code(primary)
    }

    /// Name of the locale in its own language, for the language selector.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Español",
            Locale::Fr => "Français",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Splits an `Accept-Language` header into tags ordered by preference.
///
/// Tags with `q=0` are dropped; equal weights keep header order.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let q = pieces
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            (q > 0.0).then(|| (tag.to_string(), q))
        })
        .collect();

    // sort_by is stable, so header order survives for ties
    weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    weighted.into_iter().map(|(tag, _)| tag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_is_case_insensitive() {
        assert_eq!(Locale::from_code("ES"), Some(Locale::Es));
        assert_eq!(Locale::from_code("de"), None);
    }

    #[test]
    fn test_language_tag_matches_primary_subtag() {
        assert_eq!(Locale::from_language_tag("fr-FR"), Some(Locale::Fr));
        assert_eq!(Locale::from_language_tag("es_AR"), Some(Locale::Es));
        assert_eq!(Locale::from_language_tag("pt-BR"), None);
    }

    #[test]
    fn test_accept_language_orders_by_quality() {
        let tags = parse_accept_language("de;q=0.5, fr-FR, en;q=0.8, *;q=0.1, it;q=0");
        assert_eq!(tags, vec!["fr-FR", "en", "de"]);
    }

    #[test]
    fn test_accept_language_empty_header() {
        assert!(parse_accept_language("").is_empty());
    }
}
