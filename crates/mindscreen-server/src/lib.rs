//! mindscreen-server
//!
//! Local HTTP front end for the screening flow: serves the single-page
//! client, owns live sessions and streams report downloads.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};

use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::page::index))
        .route("/health", get(routes::health::health_check))
        .route("/instrument", get(routes::instrument::get_instrument))
        .route("/sessions", post(routes::sessions::create_session))
        .route(
            "/sessions/{id}",
            get(routes::sessions::get_session).delete(routes::sessions::delete_session),
        )
        .route("/sessions/{id}/events", post(routes::sessions::apply_event))
        .route("/sessions/{id}/report", get(routes::report::download_report))
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .with_state(state)
}
