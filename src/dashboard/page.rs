//! Defines the route handler for the dashboard page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::cards::summary_cards,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, format_amount,
        link,
    },
    navigation::NavBar,
    preferences::{Currency, store::PreferenceStore},
    stats::{FinanceStats, StatsFilter, calculate_stats},
    transaction::{Transaction, TransactionType, store::TransactionStore},
};

/// How many transactions the recent activity list shows.
const RECENT_TRANSACTION_COUNT: usize = 10;

fn recent_transaction_item(transaction: &Transaction, currency: Currency) -> Markup {
    let amount = format_amount(transaction.amount, currency);
    let (signed_amount, amount_style) = match transaction.transaction_type {
        TransactionType::Income => (
            format!("+{amount}"),
            "text-green-600 dark:text-green-400 font-semibold",
        ),
        TransactionType::Expense => (
            format!("-{amount}"),
            "text-red-600 dark:text-red-400 font-semibold",
        ),
    };
    let delete_route = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id);

    html! {
        li class="flex items-center justify-between gap-4 border-b border-gray-200 py-3 last:border-b-0 dark:border-gray-700"
        {
            div class="min-w-0"
            {
                p class="truncate font-medium" { (transaction.title) }
                p class="text-xs text-gray-500 dark:text-gray-400"
                {
                    (transaction.category) " · " (transaction.date)
                }
            }

            div class="flex shrink-0 items-center gap-4"
            {
                span class=(amount_style) { (signed_amount) }

                button
                    type="button"
                    hx-delete=(delete_route)
                    hx-target="closest li"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    hx-confirm=(format!("Delete \"{}\"?", transaction.title))
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

fn dashboard_view(nav_bar: NavBar, stats: &FinanceStats, currency: Currency) -> Markup {
    let nav_bar = nav_bar.into_html();
    let recent = &stats.transactions[..stats.transactions.len().min(RECENT_TRANSACTION_COUNT)];

    let content = html! {
        (nav_bar)

        div class=(format!("gap-6 max-w-4xl {PAGE_CONTAINER_STYLE}"))
        {
            h1 class="self-start text-2xl font-bold" { "Dashboard" }

            (summary_cards(stats, currency))

            section class="w-full"
            {
                div class="mb-4 flex items-center justify-between"
                {
                    h2 class="text-xl font-semibold" { "Recent Transactions" }

                    a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "View all" }
                }

                ul class=(CARD_STYLE)
                {
                    @for transaction in recent {
                        (recent_transaction_item(transaction, currency))
                    }
                }
            }
        }
    };

    base("Dashboard", &[], &content)
}

fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "add your first transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Your balance and recent activity will show up here once you "
                (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The store holding the transaction collection.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
    /// The store holding the currency preference.
    pub preference_store: Arc<Mutex<PreferenceStore>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            preference_store: state.preference_store.clone(),
        }
    }
}

/// Display a page with an overview of the user's finances.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
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

    let store = state
        .transaction_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if store.all().is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let stats = calculate_stats(store.all(), &StatsFilter::default());

    Ok(dashboard_view(nav_bar, &stats, currency).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        preferences::store::PreferenceStore,
        transaction::{TransactionDraft, TransactionType, store::TransactionStore},
    };

    use super::{DashboardState, RECENT_TRANSACTION_COUNT, get_dashboard_page};

    fn test_state() -> DashboardState {
        DashboardState {
            transaction_store: Arc::new(Mutex::new(TransactionStore::in_memory())),
            preference_store: Arc::new(Mutex::new(PreferenceStore::in_memory())),
        }
    }

    fn draft(title: &str, amount: f64, transaction_type: TransactionType) -> TransactionDraft {
        let category = match transaction_type {
            TransactionType::Income => "Salary",
            TransactionType::Expense => "Food & Dining",
        };

        TransactionDraft {
            title: title.to_owned(),
            amount,
            transaction_type,
            category: category.to_owned(),
            date: date!(2025 - 03 - 10),
            notes: None,
        }
    }

    #[tokio::test]
    async fn dashboard_shows_summary_and_recent_transactions() {
        let state = test_state();
        {
            let mut store = state.transaction_store.lock().unwrap();
            store
                .add(draft("Paycheck", 2500.0, TransactionType::Income))
                .unwrap();
            store
                .add(draft("Groceries", 150.0, TransactionType::Expense))
                .unwrap();
        }

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;
        assert_valid_html(&html);

        let text = html.html();
        // Default currency is INR.
        assert!(text.contains("₹2,350.00"), "missing balance in {text}");
        assert!(text.contains("Paycheck"));
        assert!(text.contains("Groceries"));

        let delete_buttons = Selector::parse("button[hx-delete]").unwrap();
        assert_eq!(html.select(&delete_buttons).count(), 2);
    }

    #[tokio::test]
    async fn recent_list_is_capped() {
        let state = test_state();
        {
            let mut store = state.transaction_store.lock().unwrap();
            for index in 0..15 {
                store
                    .add(draft(
                        &format!("Transaction {index}"),
                        10.0,
                        TransactionType::Expense,
                    ))
                    .unwrap();
            }
        }

        let response = get_dashboard_page(State(state)).await.unwrap();
        let html = parse_html(response).await;

        let items = Selector::parse("section ul li").unwrap();
        assert_eq!(html.select(&items).count(), RECENT_TRANSACTION_COUNT);
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let response = get_dashboard_page(State(test_state())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;

        let cta = Selector::parse("a[href='/transactions/new']").unwrap();
        assert!(html.select(&cta).count() >= 1);
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }
}
