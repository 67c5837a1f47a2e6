//! Personal CV site: typed content, translation tables, preference stores,
//! the headless page behaviors and the axum routes serving the page.

pub mod behavior;
pub mod config;
pub mod data;
pub mod dom;
pub mod errors;
pub mod format;
pub mod i18n;
pub mod models;
pub mod preferences;
pub mod render;
pub mod routes;
pub mod state;

pub use behavior::{ListSection, NavState, PageSession, ShowMore};
pub use config::Config;
pub use dom::{DocumentRoot, Dom, EventHost, RootElement, VirtualDom};
pub use i18n::{Catalog, Locale};
pub use preferences::{PreferenceStore, SiteContext};
pub use routes::build_router;
pub use state::AppState;
