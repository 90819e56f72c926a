//! Filtered reads of a user's transactions.

use std::ops::Range;

use rusqlite::{Connection, params_from_iter, types::Value};
use time::{Date, Month, OffsetDateTime, Time};

use crate::{
    Error,
    auth::UserID,
    transaction::{Transaction, TransactionType, core::map_transaction_row},
};

/// The order to sort transactions in by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

/// Defines how transactions should be fetched from [query_transactions].
///
/// Every filter that is set must match, filters that are `None` match everything.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionQuery {
    /// Only include transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Only include transactions whose category equals this label exactly.
    pub category: Option<String>,
    /// Only include transactions dated within this half-open range.
    pub date_range: Option<Range<OffsetDateTime>>,
    /// Only include transactions whose description or category contains this
    /// text, ignoring ASCII case.
    pub search: Option<String>,
    /// Sort by date in this order, ties are broken by ID in the same order.
    ///
    /// Transactions are returned in insertion order when this is `None`.
    pub sort_date: Option<SortOrder>,
}

/// Get the transactions owned by `user_id` that match `query`.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn query_transactions(
    user_id: UserID,
    query: &TransactionQuery,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut sql = String::from(
        "SELECT id, user_id, type, category, amount, date, description
        FROM \"transaction\" WHERE user_id = ?",
    );
    let mut params: Vec<Value> = vec![Value::Integer(user_id.as_i64())];

    if let Some(transaction_type) = query.transaction_type {
        sql.push_str(" AND type = ?");
        params.push(Value::Text(transaction_type.as_str().to_owned()));
    }

    if let Some(ref category) = query.category {
        sql.push_str(" AND category = ?");
        params.push(Value::Text(category.clone()));
    }

    if let Some(ref date_range) = query.date_range {
        sql.push_str(" AND date >= ? AND date < ?");
        params.push(Value::Integer(date_range.start.unix_timestamp()));
        params.push(Value::Integer(date_range.end.unix_timestamp()));
    }

    if let Some(ref search) = query.search {
        let pattern = format!("%{}%", escape_like(search));
        sql.push_str(
            " AND (description LIKE ? ESCAPE '\\' OR category LIKE ? ESCAPE '\\')",
        );
        params.push(Value::Text(pattern.clone()));
        params.push(Value::Text(pattern));
    }

    match query.sort_date {
        Some(SortOrder::Ascending) => sql.push_str(" ORDER BY date ASC, id ASC"),
        Some(SortOrder::Descending) => sql.push_str(" ORDER BY date DESC, id DESC"),
        None => sql.push_str(" ORDER BY id ASC"),
    }

    connection
        .prepare(&sql)?
        .query_map(params_from_iter(params), map_transaction_row)?
        .map(|row| row.map_err(Error::from))
        .collect()
}

/// The half-open range covering every instant of `month` in `year`, in UTC.
///
/// # Errors
/// Returns [Error::InvalidField] if `month` is not in `1..=12` or the year is out of range.
pub fn month_range(year: i32, month: u8) -> Result<Range<OffsetDateTime>, Error> {
    let month = Month::try_from(month)
        .map_err(|_| Error::InvalidField("month", format!("{month} is not between 1 and 12")))?;
    let start = Date::from_calendar_date(year, month, 1)
        .map_err(|error| Error::InvalidField("year", error.to_string()))?;

    let (next_year, next_month) = match month {
        Month::December => (year + 1, Month::January),
        month => (year, month.next()),
    };
    let end = Date::from_calendar_date(next_year, next_month, 1)
        .map_err(|error| Error::InvalidField("year", error.to_string()))?;

    Ok(start.with_time(Time::MIDNIGHT).assume_utc()..end.with_time(Time::MIDNIGHT).assume_utc())
}

/// Escape the LIKE wildcards in `text` so it is matched literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for character in text.chars() {
        if matches!(character, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(character);
    }

    escaped
}
