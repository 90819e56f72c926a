//! Category deletion endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    Error,
    auth::User,
    category::{CategoryState, delete_category},
    database_id::CategoryId,
    db::lock,
};

/// Delete one of the user's own categories.
///
/// # Errors
///
/// Returns a 404 error if the category does not exist, a 400 error for
/// default categories and a 401 error for another user's category.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<User>,
    Path(category_id): Path<String>,
) -> Result<Json<Value>, Error> {
    let category_id: CategoryId = category_id.parse().map_err(|_| Error::NotFound)?;

    let connection = lock(&state.db_connection)?;

    if let Err(error) = delete_category(category_id, user.id, &connection) {
        tracing::debug!("User {} could not delete category {category_id}: {error}", user.id);
        return Err(error);
    }

    Ok(Json(json!({ "message": "Category removed" })))
}
