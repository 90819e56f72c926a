//! The REST API endpoint paths.
//!
//! For endpoints that take an ID, e.g. '/api/transactions/{transaction_id}', use [format_endpoint].

/// The health check route.
pub const ROOT: &str = "/";

/// The route for registering a new user.
pub const REGISTER: &str = "/api/auth/register";
/// The route for logging in and getting a bearer token.
pub const LOG_IN: &str = "/api/auth/login";
/// The route for getting the logged in user's profile.
pub const PROFILE: &str = "/api/auth/profile";

/// The route for listing and creating transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for deleting a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route for the dashboard statistics of the user's transactions.
pub const TRANSACTION_STATISTICS: &str = "/api/transactions/stats";

/// The route for listing and creating categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route for deleting a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// A parameter is the text between a left brace and the next right brace, for
/// example '{transaction_id}' in '/api/transactions/{transaction_id}'.
///
/// If `endpoint_path` has no parameter it is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| start + offset + 1);

    format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end..])
}
