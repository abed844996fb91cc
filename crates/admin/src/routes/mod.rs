//! HTTP route handlers for the admin API.

pub mod auth;
pub mod dashboard;
pub mod orders;
pub mod presets;

use axum::Router;

use crate::state::AppState;

/// Build the combined API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(presets::router())
        .merge(orders::router())
        .merge(dashboard::router())
}
