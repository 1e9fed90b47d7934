//! Registration API routes
//!
//! This module wires up the users domain to HTTP routes.

use axum::Router;
use domain_users::{handlers, MongoUserRepository, RegistrationService};

use crate::state::AppState;

/// Create the registration router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoUserRepository::new(state.db.clone());

    // Create the service
    let service = RegistrationService::new(repository);

    // Return the domain's router
    handlers::router(service)
}
