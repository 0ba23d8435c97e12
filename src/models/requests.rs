//! Request bodies for the user endpoints.
//!
//! Fields are optional so a missing field produces the same per-field 400 as
//! an empty one. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Body of `POST /users`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Body of `PUT /users/{id}/email`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEmailRequest {
    pub email: Option<String>,
}
