//! Defines the route handler for the page that displays transactions as a table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_amount, link,
    },
    navigation::NavBar,
    preferences::{Currency, store::PreferenceStore},
    stats::{FinanceStats, MonthKey, StatsFilter, calculate_stats, months_with_transactions},
    transaction::{
        core::{EXPENSE_CATEGORIES, INCOME_CATEGORIES, Transaction, TransactionType},
        store::TransactionStore,
    },
};

/// The query parameters for filtering the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// The month to filter by as "YYYY-MM".
    #[serde(default)]
    pub month: Option<String>,
    /// The category to filter by.
    #[serde(default)]
    pub category: Option<String>,
}

impl FilterQuery {
    /// Parse the raw query parameters into a filter.
    ///
    /// Empty strings come from the "All" options of the filter form and mean
    /// no filtering, the same as an absent parameter.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonthFilter] if the month is not "YYYY-MM".
    pub fn parse(self) -> Result<StatsFilter, Error> {
        let month = match self.month.as_deref() {
            None | Some("") => None,
            Some(month) => Some(month.parse::<MonthKey>()?),
        };
        let category = self.category.filter(|category| !category.is_empty());

        Ok(StatsFilter { month, category })
    }
}

fn filter_form(filter: &StatsFilter, months: &[MonthKey]) -> Markup {
    let selected_month = filter.month.map(|month| month.to_string());

    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="flex w-full flex-col gap-4 sm:flex-row sm:items-end"
        {
            div class="flex-1"
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                select
                    name="month"
                    id="month"
                    onchange="this.form.submit()"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All months" }

                    @for &month in months {
                        option
                            value=(month)
                            selected[Some(month.to_string()) == selected_month]
                        {
                            (month.label())
                        }
                    }
                }
            }

            div class="flex-1"
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    name="category"
                    id="category"
                    onchange="this.form.submit()"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All categories" }

                    @for &category in EXPENSE_CATEGORIES.iter().chain(INCOME_CATEGORIES) {
                        option
                            value=(category)
                            selected[Some(category) == filter.category.as_deref()]
                        {
                            (category)
                        }
                    }
                }
            }
        }
    }
}

fn totals_row(stats: &FinanceStats, currency: Currency) -> Markup {
    let cards = [
        ("Income", format_amount(stats.total_income, currency)),
        ("Expenses", format_amount(stats.total_expenses, currency)),
        ("Balance", format_amount(stats.total_balance, currency)),
    ];

    html! {
        div class="grid w-full grid-cols-1 gap-4 sm:grid-cols-3"
        {
            @for (label, amount) in cards {
                div class=(CARD_STYLE)
                {
                    p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
                    p class="text-xl font-bold" { (amount) }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction, currency: Currency) -> Markup {
    let amount = format_amount(transaction.amount, currency);
    let amount_style = match transaction.transaction_type {
        TransactionType::Income => "text-green-600 dark:text-green-400 font-medium",
        TransactionType::Expense => "text-red-600 dark:text-red-400 font-medium",
    };
    let signed_amount = match transaction.transaction_type {
        TransactionType::Income => format!("+{amount}"),
        TransactionType::Expense => format!("-{amount}"),
    };
    let edit_route = endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_route = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(format!("font-medium {TABLE_CELL_STYLE}"))
            {
                (transaction.title)

                @if let Some(notes) = &transaction.notes {
                    p class="text-xs font-normal text-gray-500 dark:text-gray-400" { (notes) }
                }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(format!("{amount_style} {TABLE_CELL_STYLE}")) { (signed_amount) }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(edit_route) class=(LINK_STYLE) { "Edit" }

                    button
                        type="button"
                        hx-delete=(delete_route)
                        hx-target="closest tr"
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
}

fn transactions_table(transactions: &[Transaction], currency: Currency) -> Markup {
    html! {
        div class="relative w-full overflow-x-auto shadow-md sm:rounded-lg"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row(transaction, currency))
                    }
                }
            }
        }
    }
}

fn transactions_view(
    stats: &FinanceStats,
    filter: &StatsFilter,
    months: &[MonthKey],
    currency: Currency,
    has_any_transactions: bool,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(format!("gap-6 max-w-4xl {PAGE_CONTAINER_STYLE}"))
        {
            h1 class="self-start text-2xl font-bold" { "Transactions" }

            @if has_any_transactions {
                (filter_form(filter, months))
                (totals_row(stats, currency))

                @if stats.transactions.is_empty() {
                    p
                    {
                        "No transactions match the selected filters."
                    }
                } @else {
                    (transactions_table(&stats.transactions, currency))
                }
            } @else {
                p
                {
                    "Nothing here yet. "
                    (link(endpoints::NEW_TRANSACTION_VIEW, "Add your first transaction"))
                    " to get started."
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The store holding the transaction collection.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
    /// The store holding the currency preference.
    pub preference_store: Arc<Mutex<PreferenceStore>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            preference_store: state.preference_store.clone(),
        }
    }
}

/// Render an overview of the user's transactions, filtered by the query
/// parameters.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let filter = query.parse()?;

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

    let stats = calculate_stats(store.all(), &filter);
    let months = months_with_transactions(store.all());
    let has_any_transactions = !store.all().is_empty();

    Ok(transactions_view(&stats, &filter, &months, currency, has_any_transactions).into_response())
}

#[cfg(test)]
mod filter_query_tests {
    use crate::{Error, stats::StatsFilter};

    use super::FilterQuery;

    #[test]
    fn absent_and_empty_parameters_mean_no_filter() {
        for query in [
            FilterQuery::default(),
            FilterQuery {
                month: Some("".to_owned()),
                category: Some("".to_owned()),
            },
        ] {
            assert_eq!(query.parse().unwrap(), StatsFilter::default());
        }
    }

    #[test]
    fn month_and_category_are_parsed() {
        let query = FilterQuery {
            month: Some("2024-03".to_owned()),
            category: Some("Travel".to_owned()),
        };

        let filter = query.parse().unwrap();

        assert_eq!(filter.month, Some("2024-03".parse().unwrap()));
        assert_eq!(filter.category.as_deref(), Some("Travel"));
    }

    #[test]
    fn malformed_month_is_rejected() {
        let query = FilterQuery {
            month: Some("march".to_owned()),
            category: None,
        };

        assert_eq!(
            query.parse(),
            Err(Error::InvalidMonthFilter("march".to_owned()))
        );
    }
}
