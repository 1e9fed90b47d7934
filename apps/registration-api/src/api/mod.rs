//! API routes module
//!
//! Defines all HTTP API routes for the registration service.

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes.
/// Note: these are nested under /api by axum_helpers::create_router.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/register", users::router(state))
        .merge(health::router(state.clone()))
}
