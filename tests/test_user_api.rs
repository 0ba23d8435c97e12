//! End-to-end HTTP scenarios for the user CRUD API.
//!
//! Each test starts a real server on an ephemeral port via the shared
//! `tests/test_support` helper and drives it with `reqwest`.

use anyhow::Result;
use serde_json::{json, Value};

#[path = "test_support/mod.rs"]
mod test_support;

use test_support::http_server::with_http_test_server;

async fn create_user(client: &reqwest::Client, base_url: &str, name: &str, email: &str) -> Result<Value> {
    let resp = client
        .post(format!("{}/users", base_url))
        .json(&json!({ "name": name, "email": email }))
        .send()
        .await?;
    anyhow::ensure!(resp.status().as_u16() == 201, "create failed: {}", resp.status());
    Ok(resp.json().await?)
}

#[tokio::test]
async fn test_create_user_returns_201_with_location_header() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let resp = client
                .post(format!("{}/users", server.base_url))
                .json(&json!({ "name": "John Doe", "email": "john@example.com" }))
                .send()
                .await?;

            assert_eq!(resp.status().as_u16(), 201);
            let location = resp
                .headers()
                .get("Location")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .expect("Location header");

            let body: Value = resp.json().await?;
            assert_eq!(body["name"], "John Doe");
            assert_eq!(body["email"], "john@example.com");
            let id = body["id"].as_str().expect("id field");
            assert_eq!(id.len(), 36);
            assert_eq!(location, format!("/users/{}", id));
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_create_user_trims_name_and_email() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let body =
                create_user(&client, &server.base_url, "  John Doe  ", " john@example.com ").await?;
            assert_eq!(body["name"], "John Doe");
            assert_eq!(body["email"], "john@example.com");
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_create_user_ignores_unknown_fields_and_client_id() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let resp = client
                .post(format!("{}/users", server.base_url))
                .json(&json!({
                    "id": "11111111-1111-1111-1111-111111111111",
                    "name": "John Doe",
                    "email": "john@example.com",
                    "role": "admin"
                }))
                .send()
                .await?;

            assert_eq!(resp.status().as_u16(), 201);
            let body: Value = resp.json().await?;
            assert_ne!(body["id"], "11111111-1111-1111-1111-111111111111");
            assert!(body.get("role").is_none());
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_create_user_rejects_invalid_email() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let resp = client
                .post(format!("{}/users", server.base_url))
                .json(&json!({ "name": "John Doe", "email": "invalid-email" }))
                .send()
                .await?;

            assert_eq!(resp.status().as_u16(), 400);
            let body: Value = resp.json().await?;
            assert_eq!(body["error"], "Invalid email format");
            assert_eq!(body["status"], 400);
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_create_user_rejects_missing_or_empty_fields() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();

            for (body, expected_error) in [
                (json!({ "email": "john@example.com" }), "Name is required and cannot be empty"),
                (json!({ "name": "   ", "email": "john@example.com" }), "Name is required and cannot be empty"),
                (json!({ "name": "John Doe" }), "Email is required and cannot be empty"),
                (json!({ "name": "John Doe", "email": "  " }), "Email is required and cannot be empty"),
            ] {
                let resp = client
                    .post(format!("{}/users", server.base_url))
                    .json(&body)
                    .send()
                    .await?;
                assert_eq!(resp.status().as_u16(), 400, "body: {}", body);
                let error_body: Value = resp.json().await?;
                assert_eq!(error_body["error"], expected_error, "body: {}", body);
                assert_eq!(error_body["status"], 400);
            }
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_create_user_rejects_malformed_body() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let resp = client
                .post(format!("{}/users", server.base_url))
                .header("Content-Type", "application/json")
                .body("{not valid json")
                .send()
                .await?;

            assert_eq!(resp.status().as_u16(), 400);
            let body: Value = resp.json().await?;
            assert_eq!(body["error"], "Request body must be valid JSON");
            assert_eq!(body["status"], 400);
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_get_user_round_trips_created_user() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let created =
                create_user(&client, &server.base_url, "Jane Smith", "jane@example.com").await?;
            let id = created["id"].as_str().expect("id field");

            let resp = client
                .get(format!("{}/users/{}", server.base_url, id))
                .send()
                .await?;

            assert_eq!(resp.status().as_u16(), 200);
            let body: Value = resp.json().await?;
            assert_eq!(body, created);
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_get_unknown_user_returns_404() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let unused_id = uuid::Uuid::new_v4();

            let resp = client
                .get(format!("{}/users/{}", server.base_url, unused_id))
                .send()
                .await?;

            assert_eq!(resp.status().as_u16(), 404);
            let body: Value = resp.json().await?;
            assert_eq!(body["error"], format!("User with id {} not found", unused_id));
            assert_eq!(body["status"], 404);
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_get_with_malformed_id_returns_400() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let resp = client
                .get(format!("{}/users/not-a-valid-id", server.base_url))
                .send()
                .await?;

            assert_eq!(resp.status().as_u16(), 400);
            let body: Value = resp.json().await?;
            assert_eq!(body["error"], "Invalid user id format");
            assert_eq!(body["status"], 400);
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_update_email_replaces_email_and_keeps_name() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let created =
                create_user(&client, &server.base_url, "Bob Jones", "bob@example.com").await?;
            let id = created["id"].as_str().expect("id field");

            let resp = client
                .put(format!("{}/users/{}/email", server.base_url, id))
                .json(&json!({ "email": "bob.jones@example.com" }))
                .send()
                .await?;

            assert_eq!(resp.status().as_u16(), 200);
            let body: Value = resp.json().await?;
            assert_eq!(body["id"], created["id"]);
            assert_eq!(body["name"], "Bob Jones");
            assert_eq!(body["email"], "bob.jones@example.com");

            // The replacement is what subsequent reads observe
            let resp = client
                .get(format!("{}/users/{}", server.base_url, id))
                .send()
                .await?;
            let body: Value = resp.json().await?;
            assert_eq!(body["email"], "bob.jones@example.com");
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_update_email_validation_and_missing_user() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let created =
                create_user(&client, &server.base_url, "Bob Jones", "bob@example.com").await?;
            let id = created["id"].as_str().expect("id field");

            // Bad email shape on an existing user
            let resp = client
                .put(format!("{}/users/{}/email", server.base_url, id))
                .json(&json!({ "email": "not-an-email" }))
                .send()
                .await?;
            assert_eq!(resp.status().as_u16(), 400);

            // Missing email field
            let resp = client
                .put(format!("{}/users/{}/email", server.base_url, id))
                .json(&json!({}))
                .send()
                .await?;
            assert_eq!(resp.status().as_u16(), 400);
            let body: Value = resp.json().await?;
            assert_eq!(body["error"], "Email is required and cannot be empty");

            // Unknown id
            let resp = client
                .put(format!("{}/users/{}/email", server.base_url, uuid::Uuid::new_v4()))
                .json(&json!({ "email": "new@example.com" }))
                .send()
                .await?;
            assert_eq!(resp.status().as_u16(), 404);

            // Malformed id
            let resp = client
                .put(format!("{}/users/not-a-valid-id/email", server.base_url))
                .json(&json!({ "email": "new@example.com" }))
                .send()
                .await?;
            assert_eq!(resp.status().as_u16(), 400);
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_delete_user_then_get_returns_404() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let created =
                create_user(&client, &server.base_url, "Alice Brown", "alice@example.com").await?;
            let id = created["id"].as_str().expect("id field");

            let resp = client
                .delete(format!("{}/users/{}", server.base_url, id))
                .send()
                .await?;
            assert_eq!(resp.status().as_u16(), 204);
            assert!(resp.text().await?.is_empty());

            let resp = client
                .get(format!("{}/users/{}", server.base_url, id))
                .send()
                .await?;
            assert_eq!(resp.status().as_u16(), 404);

            // Delete is not idempotent: the second attempt reports NotFound
            let resp = client
                .delete(format!("{}/users/{}", server.base_url, id))
                .send()
                .await?;
            assert_eq!(resp.status().as_u16(), 404);
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}

#[tokio::test]
async fn test_healthz_reports_healthy() {
    with_http_test_server(|server| {
        Box::pin(async move {
            let client = reqwest::Client::new();
            let resp = client
                .get(format!("{}/healthz", server.base_url))
                .send()
                .await?;

            assert_eq!(resp.status().as_u16(), 200);
            let body: Value = resp.json().await?;
            assert_eq!(body["status"], "healthy");
            assert!(body["version"].as_str().is_some());
            Ok(())
        })
    })
    .await
    .expect("with_http_test_server");
}
