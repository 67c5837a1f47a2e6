pub mod health;
pub mod page;
pub mod preferences;
pub mod robots;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(page::handle_page))
        .route("/robots.txt", get(robots::handle_robots))
        .route("/api/v1/cv", get(page::handle_cv_json))
        .route("/preferences/theme", post(preferences::handle_set_theme))
        .route("/preferences/locale", post(preferences::handle_set_locale))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::data::load_profile;
    use crate::i18n::Catalog;

    fn router_with(config: Config) -> Router {
        let profile = load_profile(None).unwrap();
        let state = AppState::new(config, profile, Catalog::embedded().unwrap());
        build_router(state)
    }

    fn router() -> Router {
        router_with(Config::default())
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(uri: &str, body: &'static str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body)).unwrap()
    }

    /// `name=value` pairs from every Set-Cookie header, joined for a Cookie header.
    fn cookies_from(response: &Response) -> String {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .collect::<Vec<_>>()
            .join("; ")
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "cv-site");
    }

    #[tokio::test]
    async fn test_page_defaults_to_dark_and_browser_language() {
        let request = Request::builder()
            .uri("/")
            .header(header::ACCEPT_LANGUAGE, "fr-FR,fr;q=0.9,en;q=0.5")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let html = body_text(response).await;
        assert!(html.contains(r#"<html lang="fr" class="dark">"#));
    }

    #[tokio::test]
    async fn test_theme_cookie_round_trip() {
        let response = router()
            .oneshot(form_post("/preferences/theme", "theme=toggle", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        let cookies = cookies_from(&response);
        assert_eq!(cookies, "theme=light");

        let request = Request::builder()
            .uri("/")
            .header(header::COOKIE, cookies)
            .body(Body::empty())
            .unwrap();
        let html = body_text(router().oneshot(request).await.unwrap()).await;
        assert!(html.contains(r#"<html lang="en" class="">"#));
    }

    #[tokio::test]
    async fn test_locale_cookie_beats_accept_language() {
        let response = router()
            .oneshot(form_post("/preferences/locale", "locale=es", Some("theme=light")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(cookies_from(&response), "locale=es");

        let request = Request::builder()
            .uri("/api/v1/cv")
            .header(header::COOKIE, "theme=light; locale=es")
            .header(header::ACCEPT_LANGUAGE, "fr")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let view: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(view["locale"], "es");
        assert_eq!(view["dark"], false);
    }

    #[tokio::test]
    async fn test_unsupported_locale_is_rejected() {
        let response = router()
            .oneshot(form_post("/preferences/locale", "locale=de", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_theme_is_rejected() {
        let response = router()
            .oneshot(form_post("/preferences/theme", "theme=sepia", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_expand_query_shows_all_skills() {
        let request = Request::builder()
            .uri("/api/v1/cv?expand=skills")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        let view: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(view["skills"]["expanded"], true);
        assert_eq!(
            view["skills"]["items"].as_array().unwrap().len() as u64,
            view["skills"]["total"].as_u64().unwrap()
        );
        assert_eq!(view["employment"]["expanded"], false);
    }

    #[tokio::test]
    async fn test_robots_uses_request_host() {
        let request = Request::builder()
            .uri("/robots.txt")
            .header(header::HOST, "cv.example.com")
            .header("x-forwarded-proto", "https")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=3600");
        assert_eq!(
            body_text(response).await,
            "User-agent: *\nAllow: /\n\nSitemap: https://cv.example.com/sitemap.xml"
        );
    }

    #[tokio::test]
    async fn test_robots_ignores_host_carrying_a_path() {
        let request = Request::builder()
            .uri("/robots.txt")
            .header(header::HOST, "a.com/x")
            .body(Body::empty())
            .unwrap();
        let body = body_text(router().oneshot(request).await.unwrap()).await;
        assert!(body.ends_with("Sitemap: http://localhost/sitemap.xml"));
    }

    #[tokio::test]
    async fn test_robots_uses_configured_origin() {
        let config = Config {
            site_origin: Some("https://chechu.dev".to_string()),
            ..Config::default()
        };
        let request = Request::builder()
            .uri("/robots.txt")
            .header(header::HOST, "internal:8080")
            .body(Body::empty())
            .unwrap();
        let body = body_text(router_with(config).oneshot(request).await.unwrap()).await;
        assert!(body.ends_with("Sitemap: https://chechu.dev/sitemap.xml"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
