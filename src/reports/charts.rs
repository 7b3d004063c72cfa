//! Chart generation and rendering for the reports page.
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization
//! code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Bar, Line, Pie, PieRoseType},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::HeadElement,
    preferences::Currency,
    stats::{CategoryTotal, FinanceStats, MonthlyTotals},
};

/// A report chart with its HTML container ID and ECharts configuration.
pub(super) struct ReportChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for the report charts.
pub(super) fn charts_view(charts: &[ReportChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for the report charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[ReportChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn income_vs_expenses_chart(stats: &FinanceStats, currency: Currency) -> Chart {
    Chart::new()
        .title(
            Title::new()
                .text("Income vs Expenses")
                .subtext("Totals for the selected filters"),
        )
        .tooltip(currency_tooltip(currency))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(vec!["Income", "Expenses"]),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter(currency))),
        )
        .series(
            Bar::new()
                .name("Total")
                .data(vec![stats.total_income, stats.total_expenses]),
        )
}

pub(super) fn category_breakdown_chart(breakdown: &[CategoryTotal], currency: Currency) -> Chart {
    let labels: Vec<String> = breakdown
        .iter()
        .map(|entry| format!("{} ({})", entry.category, entry.transaction_type.label()))
        .collect();
    let data: Vec<(f64, &str)> = breakdown
        .iter()
        .zip(&labels)
        .map(|(entry, label)| (entry.total, label.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Category Breakdown")
                .subtext("Largest categories first"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter(currency)),
        )
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name("Category")
                .rose_type(PieRoseType::Radius)
                .radius(vec!["30%", "65%"])
                .data(data),
        )
}

pub(super) fn monthly_trends_chart(series: &[MonthlyTotals], currency: Currency) -> Chart {
    let labels: Vec<String> = series
        .iter()
        .map(|totals| totals.month.short_label())
        .collect();
    let income: Vec<f64> = series.iter().map(|totals| totals.income).collect();
    let expenses: Vec<f64> = series.iter().map(|totals| totals.expenses).collect();
    let net: Vec<f64> = series.iter().map(|totals| totals.net).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Monthly Trends")
                .subtext("Last twelve months"),
        )
        .tooltip(currency_tooltip(currency))
        .legend(Legend::new().top("1%").right("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter(currency))),
        )
        .series(Line::new().name("Income").data(income))
        .series(Line::new().name("Expenses").data(expenses))
        .series(Line::new().name("Net").data(net))
}

#[inline]
fn currency_formatter(currency: Currency) -> JsFunction {
    JsFunction::new_with_args(
        "number",
        &format!(
            "const currencyFormatter = new Intl.NumberFormat('en-US', {{
              style: 'currency',
              currency: '{}'
            }});
            return (number) ? currencyFormatter.format(number) : \"-\";",
            currency.code()
        ),
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip(currency: Currency) -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter(currency))
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        preferences::Currency,
        stats::{StatsFilter, calculate_stats, category_breakdown, last_twelve_months,
            monthly_series},
        transaction::{Transaction, TransactionType},
    };

    use super::{category_breakdown_chart, income_vs_expenses_chart, monthly_trends_chart};

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 1,
                title: "Paycheck".to_owned(),
                amount: 2500.0,
                transaction_type: TransactionType::Income,
                category: "Salary".to_owned(),
                date: date!(2024 - 01 - 15),
                notes: None,
            },
            Transaction {
                id: 2,
                title: "Groceries".to_owned(),
                amount: 150.0,
                transaction_type: TransactionType::Expense,
                category: "Food & Dining".to_owned(),
                date: date!(2024 - 01 - 20),
                notes: None,
            },
        ]
    }

    #[test]
    fn income_vs_expenses_chart_serializes_totals() {
        let stats = calculate_stats(&sample_transactions(), &StatsFilter::default());

        let options = income_vs_expenses_chart(&stats, Currency::Usd).to_string();

        assert!(options.contains("2500"), "missing income in {options}");
        assert!(options.contains("150"), "missing expenses in {options}");
        assert!(options.contains("Income vs Expenses"));
    }

    #[test]
    fn breakdown_chart_labels_slices_with_type() {
        let breakdown = category_breakdown(&sample_transactions());

        let options = category_breakdown_chart(&breakdown, Currency::Usd).to_string();

        assert!(options.contains("Salary (Income)"), "{options}");
        assert!(options.contains("Food & Dining (Expense)"), "{options}");
    }

    #[test]
    fn trends_chart_has_three_series_over_twelve_months() {
        let months = last_twelve_months(date!(2024 - 02 - 29));
        let series = monthly_series(&sample_transactions(), &months);

        let options = monthly_trends_chart(&series, Currency::Usd).to_string();

        for name in ["Income", "Expenses", "Net"] {
            assert!(options.contains(name), "missing series {name} in {options}");
        }
        assert!(options.contains("Mar 2023"));
        assert!(options.contains("Feb 2024"));
    }
}
