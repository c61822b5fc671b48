//! Registration and login handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use super::{present_str, ApiError, JsonObject, MessageResponse};
use crate::observability::metrics::{record_login, record_registration};
use crate::password::verify_password;
use crate::server::ServerState;
use crate::storage::users::{find_credentials, register_user, NewUser, Registration};
use crate::storage::StoreError;

/// Successful login. Carries the role only, never the hash.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub role: Value,
}

/// Handle POST /register.
///
/// Store failures on this route are reported to the client with their
/// underlying message.
#[tracing::instrument(skip_all, fields(username, role))]
pub async fn register(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(req) = body?;

    let (Some(username), Some(email), Some(password), Some(role)) = (
        present_str(req.get("username")),
        present_str(req.get("email")),
        present_str(req.get("password")),
        present_str(req.get("role")),
    ) else {
        return Err(ApiError::MissingFields("All fields are required"));
    };

    let span = tracing::Span::current();
    span.record("username", username);
    span.record("role", role);

    let username = username.to_owned();
    let email = email.to_owned();
    let password = password.to_owned();
    let role = role.to_owned();

    let outcome = state
        .store
        .with_connection(move |conn| -> Result<_, StoreError> {
            let new_user = NewUser {
                username: &username,
                email: &email,
                password: &password,
                role: &role,
            };
            let outcome = register_user(conn, &new_user)?;
            Ok((outcome, role))
        })
        .await
        .map_err(|e| ApiError::StoreFault(e.to_string()))?;

    match outcome {
        (Registration::Created { id }, role) => {
            tracing::info!(user_id = id, "User registered");
            record_registration(&role);
            Ok((
                StatusCode::CREATED,
                MessageResponse::json("Registration successful"),
            ))
        }
        (Registration::EmailTaken, _) => Err(ApiError::DuplicateEmail),
        (Registration::UsernameTaken, _) => Err(ApiError::DuplicateUsername),
        (Registration::AdminExists, _) => Err(ApiError::AdminAlreadyExists),
    }
}

/// Handle POST /user/login.
#[tracing::instrument(skip_all, fields(username))]
pub async fn login(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<JsonObject>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = body?;

    let (Some(username), Some(password)) = (
        present_str(req.get("username")),
        present_str(req.get("password")),
    ) else {
        return Err(ApiError::MissingFields("Missing username or password"));
    };

    tracing::Span::current().record("username", username);

    let username = username.to_owned();
    let password = password.to_owned();

    let role = state
        .store
        .with_connection(move |conn| -> Result<Option<Value>, ApiError> {
            let credentials = find_credentials(conn, &username)?;
            Ok(credentials
                .filter(|c| verify_password(&password, &c.password_hash))
                .map(|c| c.role))
        })
        .await?;

    record_login(role.is_some());
    match role {
        Some(role) => {
            tracing::info!("Login succeeded");
            Ok(Json(LoginResponse {
                message: "Login successful",
                role,
            }))
        }
        None => {
            tracing::warn!("Login failed");
            Err(ApiError::InvalidCredentials)
        }
    }
}
