//! Defines the route handler for the page for adding a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
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
    transaction::form::{TransactionFormValues, transaction_form_fields},
};

fn create_transaction_view(today: Date, currency: Currency) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();
    let values = TransactionFormValues::empty(today);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add Transaction" }

                (transaction_form_fields(&values, today))

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Add Transaction"
                }
            }
        }
    };

    base("Add Transaction", &[currency_input_styles(currency)], &content)
}

/// The state needed for the add transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The store holding the currency preference.
    pub preference_store: Arc<Mutex<PreferenceStore>>,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            preference_store: state.preference_store.clone(),
        }
    }
}

/// Renders the page for adding a transaction.
pub async fn get_new_transaction_page(
    State(state): State<NewTransactionPageState>,
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

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    Ok(create_transaction_view(today, currency).into_response())
}
