//! Authentication middleware that resolves the bearer token into a user.

use std::sync::{Arc, Mutex};

use axum::{
    RequestPartsExt,
    extract::{FromRef, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use rusqlite::Connection;
use time::Duration;

use crate::{
    AppState, Error,
    auth::{TokenKeys, User, decode_token, get_user_by_id},
    db::lock,
};

/// The state needed for the auth middleware and the auth routes.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The keys used to sign and verify bearer tokens.
    pub token_keys: TokenKeys,
    /// How long newly issued bearer tokens are valid for.
    pub token_duration: Duration,
    /// The bcrypt cost used when hashing passwords of new users.
    pub password_cost: u32,
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            token_keys: state.token_keys.clone(),
            token_duration: state.token_duration,
            password_cost: state.password_cost,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Middleware function that checks for a valid bearer token.
///
/// The token's user is loaded and placed into the request, then the request is
/// executed normally. Otherwise a 401 response is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user): Extension<User>` to receive the user.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let user = match resolve_user(&mut parts, &state).await {
        Ok(user) => user,
        Err(error) => return error.into_response(),
    };

    parts.extensions.insert(user);
    let request = Request::from_parts(parts, body);

    next.run(request).await
}

async fn resolve_user(parts: &mut Parts, state: &AuthState) -> Result<User, Error> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| Error::InvalidToken)?;

    let user_id = decode_token(bearer.token(), &state.token_keys)?.user_id()?;

    let connection = lock(&state.db_connection)?;

    match get_user_by_id(user_id, &connection) {
        Ok(user) => Ok(user),
        Err(Error::NotFound) => {
            tracing::debug!("Token refers to user {user_id} who no longer exists.");
            Err(Error::InvalidToken)
        }
        Err(error) => Err(error),
    }
}
