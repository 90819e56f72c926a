//! Categories for grouping transactions, including the shared defaults.

mod create;
mod db;
mod delete;
mod domain;
mod list;
mod state;

pub use create::{CreateCategoryData, create_category_endpoint};
pub use db::{
    DEFAULT_CATEGORIES, create_category, create_category_table, delete_category,
    get_categories_for_user, get_category, seed_default_categories,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryName};
pub use list::list_categories_endpoint;
pub use state::CategoryState;
