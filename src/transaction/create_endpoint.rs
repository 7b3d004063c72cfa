//! Defines the endpoint for adding a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    transaction::{
        core::{TransactionDraft, TransactionType},
        store::TransactionStore,
    },
};

/// The state needed to add a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The store holding the transaction collection.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The form data for adding or editing a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// A short description of what the transaction was for.
    pub title: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// Whether the transaction is an income or an expense.
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// Free-form notes about the transaction.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TransactionForm {
    /// Convert the form into a draft, treating blank notes as no notes.
    pub fn into_draft(self) -> TransactionDraft {
        let notes = self
            .notes
            .filter(|notes| !notes.trim().is_empty());

        TransactionDraft {
            title: self.title,
            amount: self.amount,
            transaction_type: self.transaction_type,
            category: self.category,
            date: self.date,
            notes,
        }
    }
}

/// A route handler for adding a new transaction, redirects to the transactions
/// view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let draft = form.into_draft();

    if let Err(error) = draft.validate() {
        tracing::debug!("rejected transaction form: {error}");
        return error.into_alert_response();
    }

    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire transaction store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    if let Err(error) = store.add(draft) {
        tracing::error!("could not add transaction: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response, response::IntoResponse};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use time::macros::date;

    use crate::transaction::{TransactionType, store::TransactionStore};

    use super::{CreateTransactionState, TransactionForm, create_transaction_endpoint};

    fn test_state() -> CreateTransactionState {
        CreateTransactionState {
            transaction_store: Arc::new(Mutex::new(TransactionStore::in_memory())),
        }
    }

    fn valid_form() -> TransactionForm {
        TransactionForm {
            title: "Weekly groceries".to_owned(),
            amount: 54.20,
            transaction_type: TransactionType::Expense,
            category: "Food & Dining".to_owned(),
            date: date!(2025 - 06 - 14),
            notes: None,
        }
    }

    #[tokio::test]
    async fn can_add_transaction() {
        let state = test_state();

        let response = create_transaction_endpoint(State(state.clone()), Form(valid_form()))
            .await
            .into_response();

        assert_redirects_to_transactions_view(response);

        let store = state.transaction_store.lock().unwrap();
        assert_eq!(store.all().len(), 1);
        let transaction = &store.all()[0];
        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.title, "Weekly groceries");
        assert_eq!(transaction.amount, 54.20);
    }

    #[tokio::test]
    async fn blank_notes_are_stored_as_none() {
        let state = test_state();
        let form = TransactionForm {
            notes: Some("   ".to_owned()),
            ..valid_form()
        };

        create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        let store = state.transaction_store.lock().unwrap();
        assert_eq!(store.all()[0].notes, None);
    }

    #[tokio::test]
    async fn invalid_form_returns_alert_and_stores_nothing() {
        let state = test_state();
        let form = TransactionForm {
            amount: -5.0,
            ..valid_form()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(response.headers().get(HX_REDIRECT).is_none());

        let store = state.transaction_store.lock().unwrap();
        assert!(store.all().is_empty());
    }

    #[tokio::test]
    async fn category_from_wrong_type_is_rejected() {
        let state = test_state();
        let form = TransactionForm {
            transaction_type: TransactionType::Expense,
            category: "Salary".to_owned(),
            ..valid_form()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);

        let store = state.transaction_store.lock().unwrap();
        assert!(store.all().is_empty());
    }

    #[track_caller]
    fn assert_redirects_to_transactions_view(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/transactions",
            "got redirect to {location:?}, want redirect to /transactions"
        );
    }
}
