//! Defines the endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState, Error,
    transaction::{core::TransactionId, store::TransactionStore},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The store holding the transaction collection.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// Responds with an empty body on success so the htmx swap removes the
/// transaction's table row.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire transaction store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.delete(transaction_id) {
        Ok(true) => Html("").into_response(),
        Ok(false) => {
            tracing::debug!("tried to delete missing transaction {transaction_id}");
            Error::DeleteMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not delete transaction: {error}");
            error.into_alert_response()
        }
    }
}
