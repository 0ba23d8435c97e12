//! Server-wide middleware configuration helpers.
//!
//! Keeps the Actix application setup focused by providing reusable
//! constructors for the CORS, logging, and JSON body-parsing layers.

use actix_cors::Cors;
use actix_web::http::Method;
use actix_web::{error, middleware, web, HttpRequest, HttpResponse};
use log::debug;

use crate::config::ServerConfig;
use crate::models::responses::ErrorResponse;

/// Build CORS middleware from server configuration using actix-cors.
pub fn build_cors_from_config(config: &ServerConfig) -> Cors {
    let origins = &config.server.cors_allowed_origins;

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_any_header()
        .max_age(3600);

    if origins.is_empty() || origins.contains(&"*".to_string()) {
        cors = cors.allow_any_origin();
        debug!("CORS: Allowing any origin");
    } else {
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
        debug!("CORS: Allowed origins: {:?}", origins);
    }

    cors
}

/// Build the request logger middleware.
pub fn request_logger() -> middleware::Logger {
    middleware::Logger::default()
}

/// JSON extractor configuration that keeps the error envelope consistent:
/// malformed request bodies answer 400 with the same `{error, status}` shape
/// as handler-level failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new("Request body must be valid JSON", 400));
    error::InternalError::from_response(err, response).into()
}
