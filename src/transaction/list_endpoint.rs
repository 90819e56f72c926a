//! Defines the endpoint for listing the user's transactions.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    auth::User,
    db::lock,
    transaction::{
        SortOrder, Transaction, TransactionQuery, TransactionState, month_range,
        query_transactions,
    },
};

/// The query string filters accepted by [list_transactions_endpoint].
///
/// Every value is optional and an empty value is treated as absent, which is
/// what HTML forms and most clients send for an unset filter.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransactionFilters {
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// An exact category label.
    pub category: Option<String>,
    /// A month number from 1 to 12. Only used together with `year`.
    pub month: Option<String>,
    /// A calendar year. Only used together with `month`.
    pub year: Option<String>,
    /// Text to look for in the description or category.
    pub search: Option<String>,
}

impl TryFrom<TransactionFilters> for TransactionQuery {
    type Error = Error;

    fn try_from(filters: TransactionFilters) -> Result<Self, Self::Error> {
        let transaction_type = non_empty(filters.transaction_type)
            .map(|value| value.parse())
            .transpose()?;

        let date_range = match (non_empty(filters.month), non_empty(filters.year)) {
            (Some(month), Some(year)) => {
                let month = month.parse::<u8>().map_err(|error| {
                    Error::InvalidField("month", format!("{month:?} is not a number: {error}"))
                })?;
                let year = year.parse::<i32>().map_err(|error| {
                    Error::InvalidField("year", format!("{year:?} is not a number: {error}"))
                })?;

                Some(month_range(year, month)?)
            }
            _ => None,
        };

        Ok(TransactionQuery {
            transaction_type,
            category: filters.category.filter(|category| !category.is_empty()),
            date_range,
            search: non_empty(filters.search),
            sort_date: Some(SortOrder::Descending),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// A route handler that returns the user's transactions, newest first.
///
/// # Errors
///
/// Returns a 400 error if a filter cannot be parsed, e.g. a month of 13.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
    Query(filters): Query<TransactionFilters>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let query = TransactionQuery::try_from(filters)?;

    let connection = lock(&state.db_connection)?;
    let transactions = query_transactions(user.id, &query, &connection)?;

    Ok(Json(transactions))
}
