//! The route handler for registering a new user.

use std::str::FromStr;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use email_address::EmailAddress;
use serde::Deserialize;

use crate::{
    Error,
    auth::{AuthState, NewUser, PasswordHash, User, ValidatedPassword, create_user},
    db::lock,
    validation::RequiredFields,
};

/// The data submitted to register a new user.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterData {
    /// The name shown in the client.
    pub name: Option<String>,
    /// The email address the user will log in with.
    pub email: Option<String>,
    /// The plain text password, validated and hashed before storage.
    pub password: Option<String>,
}

/// A route handler for registering a new user.
///
/// Responds with the created user and the status code 201.
///
/// # Errors
///
/// Responds with 400 if a field is missing, the email is invalid or already
/// registered, or the password is too weak.
pub async fn register_user(
    State(state): State<AuthState>,
    body: Result<Json<RegisterData>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), Error> {
    let Json(data) = body?;

    let mut fields = RequiredFields::new();
    let name = fields.text("name", data.name);
    let email = fields.text("email", data.email);
    let password = fields.secret("password", data.password);
    fields.check()?;

    let email =
        EmailAddress::from_str(&email).map_err(|error| Error::InvalidEmail(error.to_string()))?;
    let validated_password = ValidatedPassword::new(&password, &[&name, email.as_str()])?;
    let password_hash = PasswordHash::new(validated_password, state.password_cost)?;

    let connection = lock(&state.db_connection)?;
    let user = create_user(
        NewUser {
            name,
            email,
            password_hash,
        },
        &connection,
    )?;

    tracing::info!("Registered user {}", user.id);

    Ok((StatusCode::CREATED, Json(user)))
}
