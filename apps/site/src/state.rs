use std::sync::Arc;

use crate::config::Config;
use crate::i18n::Catalog;
use crate::models::cv::CvProfile;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; per-visitor state lives in cookies.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub profile: Arc<CvProfile>,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(config: Config, profile: CvProfile, catalog: Catalog) -> Self {
        AppState {
            config,
            profile: Arc::new(profile),
            catalog: Arc::new(catalog),
        }
    }
}
