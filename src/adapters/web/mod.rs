//! Web dashboard adapter.
//!
//! Axum server with askama templates. Requests carrying `HX-Request` get the
//! page content alone so htmx can swap it in place.

mod error;
mod handlers;
mod templates;

pub use error::{status_from_error, WebError};
pub use handlers::*;
pub use templates::*;

use axum::{routing::get, Router};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::ports::data_port::DatasetPort;

pub struct AppState {
    /// Shared read-only; wrap in `CachedDatasetPort` to load once.
    pub dataset: Arc<dyn DatasetPort + Send + Sync>,
    pub static_dir: PathBuf,
}

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();
    Router::new()
        .route("/", get(handlers::overview))
        .route("/reflections", get(handlers::reflections))
        .route("/sources", get(handlers::sources))
        .route("/interactive", get(handlers::interactive))
        .route("/interactive/chart.svg", get(handlers::chart_svg))
        .route("/api/chart", get(handlers::chart_json))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
