use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    Error,
    auth::User,
    database_id::TransactionId,
    db::lock,
    transaction::{TransactionState, delete_transaction},
};

/// A route handler for deleting one of the user's transactions.
///
/// # Errors
///
/// Returns a 404 error if the transaction does not exist and a 401 error if
/// it belongs to a different user.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Value>, Error> {
    // An ID that is not a number cannot refer to a transaction.
    let transaction_id: TransactionId = transaction_id.parse().map_err(|_| Error::NotFound)?;

    let connection = lock(&state.db_connection)?;
    delete_transaction(transaction_id, user.id, &connection)?;

    tracing::debug!("User {} deleted transaction {transaction_id}", user.id);

    Ok(Json(json!({ "message": "Transaction removed" })))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, Router, http::StatusCode, routing::delete};
    use axum_test::TestServer;

    use crate::{
        Error,
        auth::User,
        db::lock,
        test_utils::{assert_message, create_test_user, get_test_connection},
        transaction::{
            Transaction, TransactionState, TransactionType, create_transaction, get_transaction,
        },
    };

    use super::delete_transaction_endpoint;

    fn get_test_server(acting_user: &User, state: &TransactionState) -> TestServer {
        let app = Router::new()
            .route("/transactions/{id}", delete(delete_transaction_endpoint))
            .layer(Extension(acting_user.clone()))
            .with_state(state.clone());

        TestServer::new(app).expect("Could not create test server.")
    }

    fn setup() -> (TransactionState, User, User, Transaction) {
        let connection = get_test_connection();
        let owner = create_test_user("owner@bar.baz", &connection);
        let intruder = create_test_user("intruder@bar.baz", &connection);
        let transaction = create_transaction(
            owner.id,
            Transaction::build(TransactionType::Expense, "Rent", 400.0),
            &connection,
        )
        .unwrap();

        let state = TransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        (state, owner, intruder, transaction)
    }

    #[tokio::test]
    async fn owner_can_delete_transaction() {
        let (state, owner, _, transaction) = setup();
        let server = get_test_server(&owner, &state);

        let response = server.delete(&format!("/transactions/{}", transaction.id)).await;

        response.assert_status_ok();
        assert_message(&response, "Transaction removed");
        let connection = lock(&state.db_connection).unwrap();
        assert_eq!(
            get_transaction(transaction.id, &connection),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn other_user_cannot_delete_transaction() {
        let (state, _, intruder, transaction) = setup();
        let server = get_test_server(&intruder, &state);

        let response = server.delete(&format!("/transactions/{}", transaction.id)).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let connection = lock(&state.db_connection).unwrap();
        assert_eq!(get_transaction(transaction.id, &connection), Ok(transaction));
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let (state, owner, _, _) = setup();
        let server = get_test_server(&owner, &state);

        server
            .delete("/transactions/9999")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete("/transactions/not-a-number")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
