use tower_http::cors::CorsLayer;

/// Creates a CORS layer that permits every origin.
///
/// The registration API is an open endpoint consumed by arbitrary frontends,
/// so requests are accepted from any origin with the common methods and
/// headers.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
