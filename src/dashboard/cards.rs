//! The summary cards shown at the top of the dashboard.

use maud::{Markup, html};

use crate::{
    html::{CARD_STYLE, format_amount},
    preferences::Currency,
    stats::FinanceStats,
};

/// Renders the total balance, income, and expense cards.
pub(super) fn summary_cards(stats: &FinanceStats, currency: Currency) -> Markup {
    let balance_style = if stats.total_balance < 0.0 {
        "text-2xl font-bold text-red-600 dark:text-red-400"
    } else {
        "text-2xl font-bold text-green-600 dark:text-green-400"
    };

    html! {
        div class="grid w-full grid-cols-1 gap-4 sm:grid-cols-3"
        {
            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Total Balance" }
                p class=(balance_style) { (format_amount(stats.total_balance, currency)) }
            }

            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Total Income" }
                p class="text-2xl font-bold text-green-600 dark:text-green-400"
                {
                    (format_amount(stats.total_income, currency))
                }
            }

            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Total Expenses" }
                p class="text-2xl font-bold text-red-600 dark:text-red-400"
                {
                    (format_amount(stats.total_expenses, currency))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use crate::{
        preferences::Currency,
        stats::FinanceStats,
    };

    use super::summary_cards;

    #[test]
    fn cards_show_formatted_totals() {
        let stats = FinanceStats {
            total_income: 3500.0,
            total_expenses: 350.0,
            total_balance: 3150.0,
            transactions: Vec::new(),
        };

        let markup = summary_cards(&stats, Currency::Usd);
        let document = Html::parse_fragment(&markup.into_string());
        let text = document.html();

        assert!(text.contains("$3,150.00"));
        assert!(text.contains("$3,500.00"));
        assert!(text.contains("$350.00"));
    }

    #[test]
    fn negative_balance_is_styled_red() {
        let stats = FinanceStats {
            total_income: 100.0,
            total_expenses: 250.0,
            total_balance: -150.0,
            transactions: Vec::new(),
        };

        let markup = summary_cards(&stats, Currency::Inr);
        let text = markup.into_string();

        assert!(text.contains("-₹150.00"));
    }
}
