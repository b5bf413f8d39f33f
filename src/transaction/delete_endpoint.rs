use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRefresh;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::UserID,
    transaction::{TransactionId, delete_transaction},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting one of the user's transactions.
///
/// On success the page is refreshed so that the cards, charts and table all
/// reflect the deletion. Transactions owned by other users are reported as
/// missing.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_transaction(transaction_id, user_id, &connection) {
        Ok(0) => Error::DeleteMissingTransaction.into_alert_response(),
        // The status code has to be 200 OK or HTMX will ignore the refresh header.
        Ok(_) => (HxRefresh(true), StatusCode::OK).into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
