//! Handlers for the `/users` endpoints.
//!
//! Every request gets exactly one JSON response with a status code from
//! {200, 201, 204, 400, 404, 500}. Validation failures short-circuit with a
//! 400 before the store is touched, and anything unanticipated is answered
//! defensively with a generic 500.

use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::{error, info};

use crate::error::{StoreError, ValidationError};
use crate::models::requests::{CreateUserRequest, UpdateEmailRequest};
use crate::models::responses::ErrorResponse;
use crate::models::user::validate_email;
use crate::models::{User, UserId};
use crate::store::UserStore;

fn bad_request(err: &ValidationError) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string(), 400))
}

fn not_found(err: &StoreError) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(err.to_string(), 404))
}

fn internal_error() -> HttpResponse {
    // Generic message only; the cause is logged, never leaked to the caller.
    HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error", 500))
}

/// POST /users - create a user
///
/// The id is generated server-side; any client-supplied id is ignored.
#[post("/users")]
pub async fn create_user(
    body: web::Json<CreateUserRequest>,
    store: web::Data<Arc<dyn UserStore>>,
) -> impl Responder {
    let name = body.name.as_deref().unwrap_or_default();
    let email = body.email.as_deref().unwrap_or_default();

    match store.create(name, email) {
        Ok(created) => {
            info!("Created user: {}", created.id());
            HttpResponse::Created()
                .insert_header(("Location", format!("/users/{}", created.id())))
                .json(created)
        }
        Err(validation) => {
            error!("Rejected user creation: {}", validation);
            bad_request(&validation)
        }
    }
}

/// GET /users/{id} - fetch a user by id
#[get("/users/{id}")]
pub async fn get_user(
    path: web::Path<String>,
    store: web::Data<Arc<dyn UserStore>>,
) -> impl Responder {
    let id: UserId = match path.parse() {
        Ok(id) => id,
        Err(validation) => {
            error!("Rejected user lookup: {}", validation);
            return bad_request(&validation);
        }
    };

    match store.find_by_id(&id) {
        Some(user) => HttpResponse::Ok().json(user),
        None => not_found(&StoreError::NotFound(id)),
    }
}

/// PUT /users/{id}/email - replace a user's email
///
/// The stored name is carried over unchanged; email is the only field this
/// API mutates.
#[put("/users/{id}/email")]
pub async fn update_user_email(
    path: web::Path<String>,
    body: web::Json<UpdateEmailRequest>,
    store: web::Data<Arc<dyn UserStore>>,
) -> impl Responder {
    let id: UserId = match path.parse() {
        Ok(id) => id,
        Err(validation) => {
            error!("Rejected email update: {}", validation);
            return bad_request(&validation);
        }
    };

    let email = match validate_email(body.email.as_deref().unwrap_or_default()) {
        Ok(email) => email,
        Err(validation) => {
            error!("Rejected email update for user {}: {}", id, validation);
            return bad_request(&validation);
        }
    };

    let existing = match store.find_by_id(&id) {
        Some(user) => user,
        None => return not_found(&StoreError::NotFound(id)),
    };

    let replacement = match User::new(existing.id(), existing.name(), email) {
        Ok(user) => user,
        Err(validation) => {
            // Inputs were already validated; reaching this is a fault.
            error!("Failed to build replacement for user {}: {}", id, validation);
            return internal_error();
        }
    };

    match store.update(&id, replacement) {
        Ok(updated) => {
            info!("Updated email for user: {}", id);
            HttpResponse::Ok().json(updated)
        }
        Err(store_err) => not_found(&store_err),
    }
}

/// DELETE /users/{id} - delete a user
#[delete("/users/{id}")]
pub async fn delete_user(
    path: web::Path<String>,
    store: web::Data<Arc<dyn UserStore>>,
) -> impl Responder {
    let id: UserId = match path.parse() {
        Ok(id) => id,
        Err(validation) => {
            error!("Rejected user deletion: {}", validation);
            return bad_request(&validation);
        }
    };

    match store.delete(&id) {
        Ok(()) => {
            info!("Deleted user: {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(store_err) => not_found(&store_err),
    }
}
