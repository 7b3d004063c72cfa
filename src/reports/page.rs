//! Defines the route handler for the reports page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    endpoints,
    html::{
        CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE,
        base, format_amount, format_amount_rounded, link,
    },
    navigation::NavBar,
    preferences::{Currency, store::PreferenceStore},
    reports::charts::{
        ReportChart, category_breakdown_chart, charts_script, charts_view,
        income_vs_expenses_chart, monthly_trends_chart,
    },
    stats::{
        FinanceStats, MonthKey, StatsFilter, average_transaction, calculate_stats,
        category_breakdown, expense_ratio, last_twelve_months, monthly_series,
        months_with_transactions,
    },
    timezone::get_local_offset,
    transaction::{
        FilterQuery,
        core::{EXPENSE_CATEGORIES, INCOME_CATEGORIES},
        store::TransactionStore,
    },
};

/// The URL the ECharts library is loaded from.
const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

fn filter_form(filter: &StatsFilter, months: &[MonthKey]) -> Markup {
    let selected_month = filter.month.map(|month| month.to_string());

    html! {
        form
            method="get"
            action=(endpoints::REPORTS_VIEW)
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

fn summary_cards(stats: &FinanceStats, currency: Currency) -> Markup {
    let net_style = if stats.total_balance < 0.0 {
        "text-xl font-bold text-red-600 dark:text-red-400"
    } else {
        "text-xl font-bold text-green-600 dark:text-green-400"
    };
    let ratio = match expense_ratio(stats) {
        Some(ratio) => format!("{ratio:.0}%"),
        None => "0%".to_owned(),
    };

    html! {
        div class="grid w-full grid-cols-2 gap-4 lg:grid-cols-4"
        {
            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Net Savings" }
                p class=(net_style) { (format_amount(stats.total_balance, currency)) }
            }

            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Avg Transaction" }
                p class="text-xl font-bold"
                {
                    (format_amount_rounded(average_transaction(stats), currency))
                }
            }

            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Transactions" }
                p class="text-xl font-bold" { (stats.transactions.len()) }
            }

            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Expense Ratio" }
                p class="text-xl font-bold" { (ratio) }
            }
        }
    }
}

fn reports_view(
    stats: &FinanceStats,
    filter: &StatsFilter,
    months: &[MonthKey],
    charts: &[ReportChart],
    currency: Currency,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(format!("gap-6 max-w-screen-xl {PAGE_CONTAINER_STYLE}"))
        {
            h1 class="self-start text-2xl font-bold" { "Reports" }

            (filter_form(filter, months))
            (summary_cards(stats, currency))
            (charts_view(charts))
        }
    };

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(charts),
    ];

    base("Reports", &scripts, &content)
}

fn reports_no_data_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "add some transactions");

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
                "Charts will show up here once you " (new_transaction_link) "."
            }
        }
    );

    base("Reports", &[], &content)
}

/// The state needed for the reports page.
#[derive(Debug, Clone)]
pub struct ReportsState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The store holding the transaction collection.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
    /// The store holding the currency preference.
    pub preference_store: Arc<Mutex<PreferenceStore>>,
}

impl FromRef<AppState> for ReportsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            transaction_store: state.transaction_store.clone(),
            preference_store: state.preference_store.clone(),
        }
    }
}

/// Display charts and summary statistics for the user's transactions, filtered
/// by the query parameters.
pub async fn get_reports_page(
    State(state): State<ReportsState>,
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

    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;
    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    let store = state
        .transaction_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    if store.all().is_empty() {
        return Ok(reports_no_data_view().into_response());
    }

    let stats = calculate_stats(store.all(), &filter);
    let months = months_with_transactions(store.all());
    let breakdown = category_breakdown(&stats.transactions);
    // The trends chart always covers the last year of the full collection so
    // a month filter does not collapse it to a single point.
    let trend_months = last_twelve_months(today);
    let trends = monthly_series(store.all(), &trend_months);

    let charts = [
        ReportChart {
            id: "income-vs-expenses-chart",
            options: income_vs_expenses_chart(&stats, currency).to_string(),
        },
        ReportChart {
            id: "category-breakdown-chart",
            options: category_breakdown_chart(&breakdown, currency).to_string(),
        },
        ReportChart {
            id: "monthly-trends-chart",
            options: monthly_trends_chart(&trends, currency).to_string(),
        },
    ];

    Ok(reports_view(&stats, &filter, &months, &charts, currency).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::{Query, State},
        http::{Response, StatusCode},
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        preferences::store::PreferenceStore,
        transaction::{
            FilterQuery, TransactionDraft, TransactionType, store::TransactionStore,
        },
    };

    use super::{ReportsState, get_reports_page};

    fn test_state() -> ReportsState {
        ReportsState {
            local_timezone: "Etc/UTC".to_owned(),
            transaction_store: Arc::new(Mutex::new(TransactionStore::in_memory())),
            preference_store: Arc::new(Mutex::new(PreferenceStore::in_memory())),
        }
    }

    fn add_sample_transactions(state: &ReportsState) {
        let mut store = state.transaction_store.lock().unwrap();
        store
            .add(TransactionDraft {
                title: "Paycheck".to_owned(),
                amount: 2500.0,
                transaction_type: TransactionType::Income,
                category: "Salary".to_owned(),
                date: date!(2024 - 01 - 15),
                notes: None,
            })
            .unwrap();
        store
            .add(TransactionDraft {
                title: "Groceries".to_owned(),
                amount: 250.0,
                transaction_type: TransactionType::Expense,
                category: "Food & Dining".to_owned(),
                date: date!(2024 - 01 - 20),
                notes: None,
            })
            .unwrap();
    }

    #[tokio::test]
    async fn reports_page_shows_charts_and_summary() {
        let state = test_state();
        add_sample_transactions(&state);

        let response = get_reports_page(State(state), Query(FilterQuery::default()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );

        assert_chart_exists(&html, "income-vs-expenses-chart");
        assert_chart_exists(&html, "category-breakdown-chart");
        assert_chart_exists(&html, "monthly-trends-chart");

        let text = html.html();
        // Net savings, default currency INR.
        assert!(text.contains("₹2,250.00"), "missing net savings in {text}");
        // Expense ratio 250 / 2500.
        assert!(text.contains("10%"), "missing expense ratio in {text}");
    }

    #[tokio::test]
    async fn expense_ratio_shows_zero_without_income() {
        let state = test_state();
        state
            .transaction_store
            .lock()
            .unwrap()
            .add(TransactionDraft {
                title: "Groceries".to_owned(),
                amount: 250.0,
                transaction_type: TransactionType::Expense,
                category: "Food & Dining".to_owned(),
                date: date!(2024 - 01 - 20),
                notes: None,
            })
            .unwrap();

        let response = get_reports_page(State(state), Query(FilterQuery::default()))
            .await
            .unwrap();
        let html = parse_html(response).await;

        assert!(html.html().contains("0%"));
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let response = get_reports_page(State(test_state()), Query(FilterQuery::default()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;

        let charts = Selector::parse("#charts").unwrap();
        assert_eq!(html.select(&charts).count(), 0);

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
    fn assert_chart_exists(html: &Html, chart_id: &str) {
        let selector = Selector::parse(&format!("#{}", chart_id)).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Chart with id '{}' not found",
            chart_id
        );
    }
}
