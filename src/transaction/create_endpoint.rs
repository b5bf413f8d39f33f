//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    auth::UserID,
    endpoints,
    transaction::{Category, Transaction, TransactionKind, create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the money was earned or spent.
    pub kind: TransactionKind,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// What the money was earned or spent on.
    pub category: String,
    /// The date when the transaction ocurred.
    pub date: Date,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
}

/// A route handler for creating a new transaction, redirects to the dashboard on success.
///
/// Invalid amounts and categories are reported with an alert and nothing is saved.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<TransactionForm>,
) -> Response {
    if !(form.amount.is_finite() && form.amount > 0.0) {
        tracing::debug!("rejected transaction with amount {}", form.amount);
        return Error::NonPositiveAmount(form.amount).into_alert_response();
    }

    let category = match Category::new(&form.category) {
        Ok(category) => category,
        Err(error) => {
            tracing::debug!("rejected transaction with category {:?}", form.category);
            return error.into_alert_response();
        }
    };

    let transaction = Transaction::build(user_id, form.kind, form.amount, category, form.date)
        .description(form.description.as_deref());

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_transaction(transaction, &connection) {
        tracing::error!("could not create transaction: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
