//! CORS policy for the web client.
//!
//! Credentials support is required because the auth tokens travel in
//! http-only cookies.

use actix_cors::Cors;
use actix_web::http::header;

use sesame_shared::config::ServerConfig;

/// Build the CORS middleware from the configured allowed origins
pub fn create_cors(config: &ServerConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
