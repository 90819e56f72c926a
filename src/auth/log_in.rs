//! The route handlers for logging in and fetching the logged in user's profile.

use std::str::FromStr;

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::{AuthState, User, encode_token, get_user_by_email},
    db::lock,
    validation::RequiredFields,
};

/// The raw data entered by the user in the log-in form.
///
/// The password is stored as a plain string. There is no need for validation here since
/// it will be compared against the password in the database, which has been verified.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogInData {
    /// Email entered during log-in.
    pub email: Option<String>,
    /// Password entered during log-in.
    pub password: Option<String>,
}

/// The response to a successful log-in: the bearer token alongside the user's details.
#[derive(Debug, Serialize)]
pub struct LogInResponse {
    /// The bearer token to send in the `Authorization` header of later requests.
    pub token: String,
    /// The user that logged in.
    #[serde(flatten)]
    pub user: User,
}

/// Handler for log-in requests via the POST method.
///
/// On success, responds with a signed bearer token and the user's details.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The email or password is missing (400).
/// - The email does not belong to a registered user (401).
/// - The password is not correct (401).
/// - An internal error occurred when verifying the password or signing the token (500).
pub async fn post_log_in(
    State(state): State<AuthState>,
    body: Result<Json<LogInData>, JsonRejection>,
) -> Result<Json<LogInResponse>, Error> {
    let Json(data) = body?;

    let mut fields = RequiredFields::new();
    let email = fields.text("email", data.email);
    let password = fields.secret("password", data.password);
    fields.check()?;

    // An email that cannot be parsed cannot belong to a registered user.
    let email = EmailAddress::from_str(&email).map_err(|_| Error::InvalidCredentials)?;

    let user = {
        let connection = lock(&state.db_connection)?;

        match get_user_by_email(&email, &connection) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::InvalidCredentials),
            Err(error) => {
                tracing::error!("Unhandled error while verifying credentials: {error}");
                return Err(error);
            }
        }
    };

    let is_password_valid = user.password_hash.verify(&password)?;

    if !is_password_valid {
        tracing::debug!("Rejected log-in attempt for user {}", user.id);
        return Err(Error::InvalidCredentials);
    }

    let token = encode_token(user.id, state.token_duration, &state.token_keys)?;

    Ok(Json(LogInResponse { token, user }))
}

/// Handler for fetching the profile of the user that made the request.
///
/// The user is resolved from the bearer token by the auth guard.
pub async fn get_profile(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}
