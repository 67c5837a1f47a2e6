use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
};

use crate::state::AppState;

pub fn robots_body(origin: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {origin}/sitemap.xml")
}

/// Public origin of the site: the configured one, else rebuilt from the
/// request's `X-Forwarded-Proto` (default `http`) and `Host` headers.
/// A `Host` that is not a bare `host[:port]` falls back to `localhost`.
pub fn request_origin(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(origin) = configured {
        return origin.to_string();
    }
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| matches!(*v, "http" | "https"))
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| is_bare_host(v))
        .unwrap_or("localhost");
    format!("{scheme}://{host}")
}

fn is_bare_host(host: &str) -> bool {
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
}

/// GET /robots.txt
pub async fn handle_robots(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let origin = request_origin(state.config.site_origin.as_deref(), &headers);
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        robots_body(&origin),
    )
}
