//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page is server-rendered HTML: forms POST back to the same paths
//! and handlers answer with redirect-plus-flash. The only JSON endpoint is
//! `/suggest`, which feeds the dashboard search box. Stylesheets are served
//! from `/static`.

pub mod auth;
pub mod dashboard;
pub mod flash;
pub mod pages;
pub mod render;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Resolve the directory holding stylesheets and other static assets.
fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"))
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/register", get(auth::register_page).post(auth::register_submit))
        .route("/signin", get(auth::signin_page).post(auth::signin_submit))
        .route("/dashboard", get(dashboard::dashboard).post(dashboard::dashboard))
        .route("/logout", get(auth::logout))
        .route("/suggest", get(dashboard::suggest))
        .route("/healthz", get(healthz))
        .nest_service("/static", ServeDir::new(static_dir()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
