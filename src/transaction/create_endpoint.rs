//! Defines the endpoint for creating a new transaction.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use time::{
    Date, OffsetDateTime, Time, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{
    Error,
    auth::User,
    db::lock,
    transaction::{Transaction, TransactionState, TransactionType, create_transaction},
    validation::RequiredFields,
};

/// The JSON body for creating a transaction.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTransactionData {
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// The category label.
    pub category: Option<String>,
    /// The amount of money. Zero is treated as missing.
    pub amount: Option<f64>,
    /// Text detailing the transaction.
    pub description: Option<String>,
    /// An RFC 3339 date-time or a `YYYY-MM-DD` date. Defaults to now.
    pub date: Option<String>,
}

/// A route handler for creating a new transaction owned by the requesting user.
///
/// Responds with 201 and the created transaction.
///
/// # Errors
///
/// Returns a 400 error if the type, category or amount is missing, or if the
/// type or date cannot be parsed.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
    body: Result<Json<CreateTransactionData>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let Json(data) = body?;

    let mut fields = RequiredFields::new();
    let transaction_type = fields.text("type", data.transaction_type);
    let category = fields.label("category", data.category);
    let amount = fields.number("amount", data.amount);
    fields.check()?;

    let transaction_type: TransactionType = transaction_type.parse()?;
    let mut builder = Transaction::build(transaction_type, &category, amount);

    if let Some(date) = data.date.as_deref().map(str::trim).filter(|date| !date.is_empty()) {
        builder = builder.date(parse_date(date)?);
    }

    if let Some(description) = data
        .description
        .as_deref()
        .map(str::trim)
        .filter(|description| !description.is_empty())
    {
        builder = builder.description(description);
    }

    let connection = lock(&state.db_connection)?;
    let transaction = create_transaction(user.id, builder, &connection)?;

    tracing::debug!("User {} created transaction {}", user.id, transaction.id);

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Parse an RFC 3339 date-time, or a calendar date which is taken as midnight UTC.
///
/// The date must fall within the years 0 to 9999 in UTC, the range RFC 3339
/// can represent.
fn parse_date(text: &str) -> Result<OffsetDateTime, Error> {
    let date_time = OffsetDateTime::parse(text, &Rfc3339)
        .or_else(|_| {
            Date::parse(text, format_description!("[year]-[month]-[day]"))
                .map(|date| date.with_time(Time::MIDNIGHT).assume_utc())
        })
        .map_err(|_| {
            Error::InvalidField(
                "date",
                format!("expected an RFC 3339 date-time or YYYY-MM-DD, got {text:?}"),
            )
        })?;

    if !(0..=9999).contains(&date_time.to_offset(UtcOffset::UTC).year()) {
        return Err(Error::InvalidField(
            "date",
            format!("the year must be between 0 and 9999, got {text:?}"),
        ));
    }

    Ok(date_time)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use time::macros::datetime;

    use crate::{
        Error,
        auth::User,
        db::lock,
        test_utils::{assert_message, create_test_user, get_test_connection},
        transaction::{TransactionQuery, TransactionState, query_transactions},
    };

    use super::{create_transaction_endpoint, parse_date};

    fn get_test_server() -> (TestServer, TransactionState, User) {
        let connection = get_test_connection();
        let user = create_test_user("foo@bar.baz", &connection);
        let state = TransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        };
        let app = Router::new()
            .route("/transactions", post(create_transaction_endpoint))
            .layer(Extension(user.clone()))
            .with_state(state.clone());

        (
            TestServer::new(app).expect("Could not create test server."),
            state,
            user,
        )
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let (server, state, user) = get_test_server();

        let response = server
            .post("/transactions")
            .json(&json!({
                "type": "expense",
                "category": "Rent",
                "amount": 400,
                "description": "February rent",
                "date": "2024-02-01"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["type"], "expense");
        assert_eq!(body["category"], "Rent");
        assert_eq!(body["amount"], 400.0);
        assert_eq!(body["description"], "February rent");
        assert_eq!(body["date"], "2024-02-01T00:00:00Z");
        assert_eq!(body["userId"], user.id.as_i64());

        let connection = lock(&state.db_connection).unwrap();
        let stored =
            query_transactions(user.id, &TransactionQuery::default(), &connection).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(body["_id"], stored[0].id);
    }

    #[tokio::test]
    async fn date_defaults_to_now() {
        let (server, _, _) = get_test_server();

        let response = server
            .post("/transactions")
            .json(&json!({ "type": "income", "category": "Salary", "amount": 1000 }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert!(body["date"].is_string());
        assert!(body["description"].is_null());
    }

    #[tokio::test]
    async fn rejects_missing_fields() {
        let (server, _, _) = get_test_server();

        let response = server
            .post("/transactions")
            .json(&json!({ "category": "  ", "amount": 0 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_message(&response, "Please add all fields: type, category, amount");
    }

    #[tokio::test]
    async fn rejects_unknown_type() {
        let (server, _, _) = get_test_server();

        server
            .post("/transactions")
            .json(&json!({ "type": "transfer", "category": "Rent", "amount": 10 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_malformed_body() {
        let (server, _, _) = get_test_server();

        server
            .post("/transactions")
            .text("{not json")
            .content_type("application/json")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[test]
    fn parses_rfc3339_and_calendar_dates() {
        assert_eq!(
            parse_date("2024-02-10T12:30:00+13:00"),
            Ok(datetime!(2024-02-10 12:30 +13:00))
        );
        assert_eq!(parse_date("2024-02-10"), Ok(datetime!(2024-02-10 0:00 UTC)));
        assert!(parse_date("10/02/2024").is_err());
    }

    #[test]
    fn rejects_years_rfc3339_cannot_represent() {
        for text in ["-0001-01-01", "+10000-01-01", "0000-01-01T00:30:00+01:00"] {
            assert!(
                matches!(parse_date(text), Err(Error::InvalidField("date", _))),
                "{text:?} should be rejected"
            );
        }
        assert_eq!(parse_date("0000-01-01"), Ok(datetime!(0000-01-01 0:00 UTC)));
    }

    #[tokio::test]
    async fn negative_year_is_rejected_and_not_stored() {
        let (server, state, user) = get_test_server();

        let response = server
            .post("/transactions")
            .json(&json!({
                "type": "expense",
                "category": "Rent",
                "amount": 1,
                "date": "-0001-01-01"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let connection = lock(&state.db_connection).unwrap();
        let stored =
            query_transactions(user.id, &TransactionQuery::default(), &connection).unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn stores_category_label_as_given() {
        let (server, _, _) = get_test_server();

        let response = server
            .post("/transactions")
            .json(&json!({ "type": "expense", "category": " Rent", "amount": 10 }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["category"], " Rent");
    }
}
