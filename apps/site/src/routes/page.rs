use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;

use crate::dom::RootElement;
use crate::i18n::parse_accept_language;
use crate::preferences::{CookieStore, SiteContext};
use crate::render::{build_page_view, render_page, ExpansionState, PageView};
use crate::state::AppState;

/// Responses depend on the preference cookies and the browser languages.
const VARY: &str = "Cookie, Accept-Language";

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Comma-separated list sections to expand.
    pub expand: Option<String>,
}

/// Resolves theme and locale for one request: cookies first, then
/// `Accept-Language`, then the configured defaults.
pub fn request_context(
    state: &AppState,
    headers: &HeaderMap,
) -> (SiteContext<CookieStore>, RootElement) {
    let browser_languages = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(parse_accept_language)
        .unwrap_or_default();

    let mut root = RootElement::default();
    let context = SiteContext::init(
        CookieStore::from_headers(headers),
        &mut root,
        &browser_languages,
        state.config.default_dark,
        state.config.default_locale,
    );
    (context, root)
}

fn page_view(state: &AppState, headers: &HeaderMap, query: &PageQuery) -> PageView {
    let (context, root) = request_context(state, headers);
    build_page_view(
        &state.profile,
        &state.catalog,
        context.locale(),
        &root,
        context.is_dark(),
        &ExpansionState::from_query(query.expand.as_deref()),
    )
}

/// GET /
pub async fn handle_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let view = page_view(&state, &headers, &query);
    ([(header::VARY, VARY)], Html(render_page(&view)))
}

/// GET /api/v1/cv
pub async fn handle_cv_json(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    ([(header::VARY, VARY)], Json(page_view(&state, &headers, &query)))
}
