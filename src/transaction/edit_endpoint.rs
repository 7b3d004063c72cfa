//! Defines the endpoint for saving changes to an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error, endpoints,
    transaction::{
        core::{TransactionId, TransactionPatch},
        create_endpoint::TransactionForm,
        store::TransactionStore,
    },
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The store holding the transaction collection.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler for saving the edit form, redirects to the transactions
/// view on success.
///
/// The edit form always submits every field, so the whole record is replaced.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let draft = form.into_draft();

    if let Err(error) = draft.validate() {
        tracing::debug!("rejected transaction form: {error}");
        return error.into_alert_response();
    }

    let patch = TransactionPatch {
        title: Some(draft.title),
        amount: Some(draft.amount),
        transaction_type: Some(draft.transaction_type),
        category: Some(draft.category),
        date: Some(draft.date),
        notes: Some(draft.notes),
    };

    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire transaction store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.update(transaction_id, patch) {
        Ok(true) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Ok(false) => {
            tracing::debug!("tried to update missing transaction {transaction_id}");
            Error::UpdateMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not update transaction: {error}");
            error.into_alert_response()
        }
    }
}
