//! User registration, log-in and bearer token authentication.

mod log_in;
mod middleware;
mod password;
mod register_user;
mod token;
mod user;

pub use log_in::{LogInData, LogInResponse, get_profile, post_log_in};
pub use middleware::{AuthState, auth_guard};
pub use password::{PasswordHash, ValidatedPassword};
pub use register_user::{RegisterData, register_user};
pub use token::{Claims, DEFAULT_TOKEN_DURATION, TokenKeys, decode_token, encode_token};
pub use user::{
    DEFAULT_CURRENCY, DEFAULT_ROLE, NewUser, User, UserID, create_user, create_user_table,
    get_user_by_email, get_user_by_id,
};
