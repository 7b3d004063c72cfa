//! Defines the route handler for the page for editing an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, currency_input_styles, loading_spinner,
    },
    navigation::NavBar,
    preferences::{Currency, store::PreferenceStore},
    timezone::get_local_offset,
    transaction::{
        core::{Transaction, TransactionId},
        form::{TransactionFormValues, transaction_form_fields},
        store::TransactionStore,
    },
};

fn edit_transaction_view(transaction: &Transaction, max_date: Date, currency: Currency) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let spinner = loading_spinner();
    let update_route = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id);
    let values = TransactionFormValues {
        transaction_type: transaction.transaction_type,
        title: &transaction.title,
        amount: Some(transaction.amount),
        category: Some(&transaction.category),
        date: transaction.date,
        notes: transaction.notes.as_deref().unwrap_or(""),
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Transaction" }

                (transaction_form_fields(&values, max_date))

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Save Changes"
                }
            }
        }
    };

    base("Edit Transaction", &[currency_input_styles(currency)], &content)
}

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The store holding the transaction collection.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
    /// The store holding the currency preference.
    pub preference_store: Arc<Mutex<PreferenceStore>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            transaction_store: state.transaction_store.clone(),
            preference_store: state.preference_store.clone(),
        }
    }
}

/// Renders the page for editing the transaction with the given ID.
///
/// # Errors
/// Returns [Error::NotFound] when no transaction has that ID.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let currency = {
        let store = state
            .preference_store
            .lock()
            .inspect_err(|error| {
                tracing::error!("could not acquire preference store lock: {error}")
            })
            .map_err(|_| Error::StoreLockError)?;

        store.get().currency
    };

    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;
    let max_date = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    let store = state
        .transaction_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let transaction = store.get(transaction_id).ok_or(Error::NotFound)?;

    Ok(edit_transaction_view(transaction, max_date, currency).into_response())
}
