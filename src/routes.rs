//! HTTP route configuration.

use actix_web::{web, HttpResponse};

use crate::handlers;
use crate::models::responses::HealthResponse;

/// Register all service routes:
/// - POST   /users              create a user
/// - GET    /users/{id}         fetch a user
/// - PUT    /users/{id}/email   replace a user's email
/// - DELETE /users/{id}         delete a user
/// - GET    /healthz            liveness probe
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::users::create_user)
        .service(handlers::users::get_user)
        .service(handlers::users::update_user_email)
        .service(handlers::users::delete_user)
        .route("/healthz", web::get().to(healthz_handler));
}

/// GET /healthz - liveness probe. No authentication, never fails; intended
/// for load balancer health checks.
async fn healthz_handler() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::ok())
}
