//! Error types for the user CRUD service.
//!
//! `ValidationError` covers malformed client input and always maps to 400.
//! `StoreError::NotFound` is a distinguishable store outcome, not a generic
//! fault, so handlers can map it to 404 deterministically. Anything else is
//! treated as an internal fault and answered with 500.

use thiserror::Error;

use crate::models::UserId;

/// Client input failed validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required and cannot be empty")]
    EmptyName,

    #[error("Email is required and cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Invalid user id format")]
    InvalidUserId,
}

/// Errors raised by [`crate::store::UserStore`] operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("User with id {0} not found")]
    NotFound(UserId),
}
