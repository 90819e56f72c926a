//! Category creation endpoint.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    Error,
    auth::User,
    category::{Category, CategoryName, CategoryState, create_category},
    db::lock,
    transaction::TransactionType,
    validation::RequiredFields,
};

/// The JSON body for creating a category.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCategoryData {
    /// The name of the new category.
    pub name: Option<String>,
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub category_type: Option<String>,
}

/// Create a category owned by the requesting user. Responds with 201 and the category.
///
/// # Errors
///
/// Returns a 400 error if the name or type is missing or invalid, or if the
/// user already has a category with the same name and type.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<User>,
    body: Result<Json<CreateCategoryData>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), Error> {
    let Json(data) = body?;

    let mut fields = RequiredFields::new();
    let name = fields.text("name", data.name);
    let category_type = fields.text("type", data.category_type);
    fields.check()?;

    let name = CategoryName::new(&name)?;
    let category_type: TransactionType = category_type.parse()?;

    let connection = lock(&state.db_connection)?;
    let category = create_category(name, category_type, user.id, &connection)?;

    Ok((StatusCode::CREATED, Json(category)))
}
