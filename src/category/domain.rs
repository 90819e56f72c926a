//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::Serialize;

use crate::{Error, auth::UserID, database_id::CategoryId, transaction::TransactionType};

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::MissingFields] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::MissingFields("name".to_owned()))
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named group of income or expenses, e.g. 'Salary' or 'Rent'.
///
/// Default categories have no owner and are shared by every user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// The ID of the category.
    #[serde(rename = "_id")]
    pub id: CategoryId,
    /// The name shown to the user.
    pub name: CategoryName,
    /// Whether this category is for income or expenses.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// The user that created the category, `None` for default categories.
    #[serde(rename = "userId")]
    pub user_id: Option<UserID>,
}

impl Category {
    /// Whether this is one of the shared default categories.
    pub fn is_default(&self) -> bool {
        self.user_id.is_none()
    }
}

#[cfg(test)]
mod category_name_tests {
    use crate::{Error, category::CategoryName};

    #[test]
    fn new_fails_on_empty_string() {
        assert_eq!(
            CategoryName::new(""),
            Err(Error::MissingFields("name".to_owned()))
        );
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        assert!(CategoryName::new("\n\t \r").is_err());
    }

    #[test]
    fn new_trims_whitespace() {
        assert_eq!(CategoryName::new("  Pets ").unwrap().as_ref(), "Pets");
    }
}
