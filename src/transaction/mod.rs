//! Income and expense transactions: storage, filtered listing and the route
//! handlers for listing, creating and deleting them.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod query;
mod state;

pub use core::{
    Transaction, TransactionBuilder, TransactionType, create_transaction,
    create_transaction_table, delete_transaction, get_transaction,
};
pub use create_endpoint::{CreateTransactionData, create_transaction_endpoint};
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::{TransactionFilters, list_transactions_endpoint};
pub use query::{SortOrder, TransactionQuery, month_range, query_transactions};
pub use state::TransactionState;
