//! CORS middleware configuration for cross-origin requests.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ea_shared::CorsConfig;

/// Creates a CORS middleware instance from the configured origins.
///
/// `*` in the origin list allows any origin; an empty list allows none.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        log::info!("Configuring CORS to allow any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
