//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    auth::UserID,
    category::{Category, CategoryName},
    database_id::CategoryId,
    transaction::TransactionType,
};

/// The categories every user starts with.
pub const DEFAULT_CATEGORIES: [(&str, TransactionType); 13] = [
    ("Salary", TransactionType::Income),
    ("Freelance", TransactionType::Income),
    ("Investments", TransactionType::Income),
    ("Gifts", TransactionType::Income),
    ("Other Income", TransactionType::Income),
    ("Food", TransactionType::Expense),
    ("Rent", TransactionType::Expense),
    ("Transport", TransactionType::Expense),
    ("Utilities", TransactionType::Expense),
    ("Entertainment", TransactionType::Expense),
    ("Health", TransactionType::Expense),
    ("Shopping", TransactionType::Expense),
    ("Other", TransactionType::Expense),
];

/// Create a category owned by `user_id` and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateCategory] if the user already has a category with the same name and type,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_category(
    name: CategoryName,
    category_type: TransactionType,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (name, type, user_id) VALUES (?1, ?2, ?3);",
        (name.as_ref(), category_type, user_id.as_i64()),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name,
        category_type,
        user_id: Some(user_id),
    })
}

/// Retrieve a single category by ID.
///
/// # Errors
/// Returns [Error::NotFound] if `category_id` does not refer to a category.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, type, user_id FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve the categories created by `user_id` along with the default
/// categories, ordered by type and then name.
pub fn get_categories_for_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, type, user_id FROM category
            WHERE user_id = ?1 OR user_id IS NULL
            ORDER BY type ASC, name ASC;",
        )?
        .query_map([user_id.as_i64()], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Delete the category `category_id` on behalf of `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the category does not exist,
/// - [Error::DefaultCategoryProtected] if it is a default category,
/// - [Error::Forbidden] if it belongs to another user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let category = get_category(category_id, connection)?;

    match category.user_id {
        None => return Err(Error::DefaultCategoryProtected),
        Some(owner) if owner != user_id => return Err(Error::Forbidden),
        Some(_) => {}
    }

    let rows_affected = connection.execute(
        "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
        (category_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            user_id INTEGER,
            UNIQUE(user_id, name, type),
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_category_user ON category(user_id);",
    )?;

    Ok(())
}

/// Insert [DEFAULT_CATEGORIES] unless default categories already exist.
pub fn seed_default_categories(connection: &Connection) -> Result<(), rusqlite::Error> {
    let default_count: i64 = connection.query_row(
        "SELECT COUNT(*) FROM category WHERE user_id IS NULL",
        [],
        |row| row.get(0),
    )?;

    if default_count > 0 {
        return Ok(());
    }

    let mut statement =
        connection.prepare("INSERT INTO category (name, type, user_id) VALUES (?1, ?2, NULL)")?;

    for (name, category_type) in DEFAULT_CATEGORIES {
        statement.execute((name, category_type))?;
    }

    tracing::debug!("Seeded {} default categories", DEFAULT_CATEGORIES.len());

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let category_type = row.get(2)?;
    let user_id: Option<i64> = row.get(3)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        category_type,
        user_id: user_id.map(UserID::new),
    })
}
