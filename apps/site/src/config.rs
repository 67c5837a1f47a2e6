use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::i18n::Locale;

/// Application configuration loaded from environment variables.
/// Every variable is optional; defaults give a dark, English site on :8080.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Public origin used in robots.txt, e.g. `https://cv.example.com`.
    /// When unset the request `Host` header is used instead.
    pub site_origin: Option<String>,
    /// JSON content file replacing the embedded CV document.
    pub cv_data_path: Option<PathBuf>,
    pub default_dark: bool,
    pub default_locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            site_origin: None,
            cv_data_path: None,
            default_dark: true,
            default_locale: Locale::En,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let default_dark = match optional_env("DEFAULT_THEME").as_deref() {
            None => defaults.default_dark,
            Some("dark") => true,
            Some("light") => false,
            Some(other) => {
                return Err(anyhow!(
                    "DEFAULT_THEME must be 'dark' or 'light', got '{other}'"
                ))
            }
        };

        let default_locale = match optional_env("DEFAULT_LOCALE") {
            None => defaults.default_locale,
            Some(code) => Locale::from_code(&code)
                .with_context(|| format!("DEFAULT_LOCALE '{code}' is not a supported locale"))?,
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            site_origin: optional_env("SITE_ORIGIN").map(|o| o.trim_end_matches('/').to_string()),
            cv_data_path: optional_env("CV_DATA_PATH").map(PathBuf::from),
            default_dark,
            default_locale,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
