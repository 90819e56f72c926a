//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of a [Transaction](crate::transaction::Transaction).
pub type TransactionId = DatabaseId;

/// The ID of a [Category](crate::category::Category).
pub type CategoryId = DatabaseId;
