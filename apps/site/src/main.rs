use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cv_site::preferences::theme::theme_value;
use cv_site::{build_router, data, AppState, Catalog, Config, Locale};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV site v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Catalog::embedded().context("failed to load translation tables")?;
    info!("Translation tables loaded for {} locales", Locale::ALL.len());

    let profile = data::load_profile(config.cv_data_path.as_deref())
        .context("failed to load CV content")?;

    info!(
        "Defaults: theme={}, locale={}",
        theme_value(config.default_dark),
        config.default_locale
    );

    let state = AppState::new(config.clone(), profile, catalog);

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
