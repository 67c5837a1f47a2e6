//! Cookie-backed preference storage for the HTTP surface.

use std::collections::HashMap;

use axum::http::{header, HeaderMap};

use super::storage::{PreferenceStore, StorageError};

/// One year.
pub const COOKIE_MAX_AGE_SECS: u64 = 31_536_000;

/// Preferences read from the request's `Cookie` headers. Writes are kept
/// both for later reads in the same request and as `Set-Cookie` values for
/// the response.
#[derive(Debug, Clone, Default)]
pub struct CookieStore {
    values: HashMap<String, String>,
    pending: Vec<(String, String)>,
}

impl CookieStore {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut values = HashMap::new();
        for raw in headers.get_all(header::COOKIE) {
            if let Ok(raw) = raw.to_str() {
                values.extend(parse_cookie_header(raw));
            }
        }
        CookieStore {
            values,
            pending: Vec::new(),
        }
    }

    /// `Set-Cookie` header values for every write made through this store.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.pending
            .iter()
            .map(|(name, value)| {
                format!("{name}={value}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}; SameSite=Lax")
            })
            .collect()
    }
}

/// Parses `a=1; b=2` into pairs. Malformed pieces are skipped.
pub fn parse_cookie_header(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = value.trim().trim_matches('"');
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

fn is_cookie_octet(c: char) -> bool {
    c.is_ascii_graphic() && !matches!(c, '"' | ',' | ';' | '\\')
}

impl PreferenceStore for CookieStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(bad) = value.chars().find(|c| !is_cookie_octet(*c)) {
            return Err(StorageError::InvalidValue {
                key: key.to_string(),
                reason: format!("character {bad:?} is not allowed in a cookie"),
            });
        }
        self.values.insert(key.to_string(), value.to_string());
        self.pending.retain(|(name, _)| name != key);
        self.pending.push((key.to_string(), value.to_string()));
        Ok(())
    }
}
