use axum::{Extension, Json, extract::State};

use crate::{
    Error,
    auth::User,
    db::lock,
    statistics::{StatisticsSnapshot, compute_statistics},
    transaction::{TransactionQuery, TransactionState, query_transactions},
};

/// Route handler for the dashboard statistics of the requesting user.
pub async fn get_statistics_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
) -> Result<Json<StatisticsSnapshot>, Error> {
    let transactions = {
        let connection = lock(&state.db_connection)?;
        query_transactions(user.id, &TransactionQuery::default(), &connection)?
    };

    Ok(Json(compute_statistics(&transactions)))
}
