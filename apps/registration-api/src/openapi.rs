//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Registration API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for user registration",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    nest(
        (path = "/api/register", api = domain_users::ApiDoc)
    ),
    tags(
        (name = "Registration", description = "User registration endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
