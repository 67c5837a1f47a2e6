use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;

use super::page::request_context;
use crate::errors::AppError;
use crate::i18n::Locale;
use crate::preferences::theme::theme_value;
use crate::preferences::CookieStore;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    /// `dark`, `light` or `toggle`.
    pub theme: String,
}

#[derive(Debug, Deserialize)]
pub struct LocaleForm {
    pub locale: String,
}

/// 303 back to the page, carrying the cookies written by the store.
fn redirect_home(store: &CookieStore) -> Result<Response, AppError> {
    let mut response = Redirect::to("/").into_response();
    for cookie in store.set_cookie_headers() {
        let value = HeaderValue::from_str(&cookie).context("invalid Set-Cookie value")?;
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    Ok(response)
}

/// POST /preferences/theme
pub async fn handle_set_theme(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ThemeForm>,
) -> Result<Response, AppError> {
    let (mut context, mut root) = request_context(&state, &headers);
    match form.theme.trim() {
        "toggle" => context.toggle_theme(&mut root),
        "dark" => context.set_dark(true, &mut root),
        "light" => context.set_dark(false, &mut root),
        other => {
            return Err(AppError::Validation(format!(
                "theme must be 'dark', 'light' or 'toggle', got '{other}'"
            )))
        }
    }
    info!("Theme preference set to {}", theme_value(context.is_dark()));
    redirect_home(context.store())
}

/// POST /preferences/locale
pub async fn handle_set_locale(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LocaleForm>,
) -> Result<Response, AppError> {
    let locale = Locale::from_code(&form.locale)
        .ok_or_else(|| AppError::Validation(format!("unsupported locale '{}'", form.locale)))?;

    let (mut context, mut root) = request_context(&state, &headers);
    context.set_locale(locale, &mut root);
    info!("Locale preference set to {locale}");
    redirect_home(context.store())
}
