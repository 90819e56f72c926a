//! Category listing endpoint.

use axum::{Extension, Json, extract::State};

use crate::{
    Error,
    auth::User,
    category::{Category, CategoryState, get_categories_for_user},
    db::lock,
};

/// Returns the default categories and the user's own categories, ordered by type then name.
pub async fn list_categories_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = lock(&state.db_connection)?;
    let categories = get_categories_for_user(user.id, &connection)?;

    Ok(Json(categories))
}
