//! Pure aggregation over the transaction collection.
//!
//! Everything in this module is a function of the transaction slice and the
//! active filter. Nothing is cached, every page render recomputes its numbers
//! from scratch so the totals can never drift from the stored records.

use std::{collections::BTreeMap, fmt, str::FromStr};

use time::Date;

use crate::{
    Error,
    transaction::{Transaction, TransactionType},
};

/// A calendar month, used for filtering and for the monthly report series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    /// 1-indexed month number.
    month: u8,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl MonthKey {
    /// The month that `date` falls in.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }

    /// Whether `date` falls within this month.
    pub fn contains(self, date: Date) -> bool {
        self == Self::from_date(date)
    }

    /// The month before this one.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// A human-readable label, e.g. "March 2025".
    pub fn label(self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    /// A short label for chart axes, e.g. "Mar 2025".
    pub fn short_label(self) -> String {
        format!(
            "{} {}",
            &MONTH_NAMES[(self.month - 1) as usize][..3],
            self.year
        )
    }
}

impl fmt::Display for MonthKey {
    /// Formats as "YYYY-MM", the same shape the month filter accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || Error::InvalidMonthFilter(s.to_owned());

        let (year, month) = s.split_once('-').ok_or_else(parse_error)?;
        let year: i32 = year.parse().map_err(|_| parse_error())?;
        let month: u8 = month.parse().map_err(|_| parse_error())?;

        if !(1..=12).contains(&month) {
            return Err(parse_error());
        }

        Ok(Self { year, month })
    }
}

/// The active filter for totals and report pages.
///
/// Both criteria must match when both are set, and an empty filter matches
/// every transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsFilter {
    /// Keep only transactions within this month.
    pub month: Option<MonthKey>,
    /// Keep only transactions with exactly this category.
    pub category: Option<String>,
}

impl StatsFilter {
    /// Whether `transaction` passes the filter.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let month_matches = self
            .month
            .is_none_or(|month| month.contains(transaction.date));
        let category_matches = self
            .category
            .as_deref()
            .is_none_or(|category| transaction.category == category);

        month_matches && category_matches
    }
}

/// The derived totals for the active filter. Never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceStats {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expenses: f64,
    /// `total_income - total_expenses`.
    pub total_balance: f64,
    /// The transactions that passed the filter, in stored order (newest first).
    pub transactions: Vec<Transaction>,
}

/// Compute the totals over `transactions` for the given `filter`.
///
/// This is a pure function: the same inputs always produce the same stats.
pub fn calculate_stats(transactions: &[Transaction], filter: &StatsFilter) -> FinanceStats {
    let transactions: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .cloned()
        .collect();

    let total_income = sum_amounts(&transactions, TransactionType::Income);
    let total_expenses = sum_amounts(&transactions, TransactionType::Expense);

    FinanceStats {
        total_income,
        total_expenses,
        total_balance: total_income - total_expenses,
        transactions,
    }
}

fn sum_amounts(transactions: &[Transaction], transaction_type: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == transaction_type)
        .map(|transaction| transaction.amount)
        .sum()
}

/// The total amount for one category, used for the breakdown chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// Whether the total is income or spending.
    pub transaction_type: TransactionType,
    /// The summed amount for the category.
    pub total: f64,
}

/// Sum `transactions` per (type, category) pair, largest totals first.
///
/// Categories are split by type so that e.g. income "Other" and expense
/// "Other" stay separate slices of the breakdown chart.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<(&str, TransactionType), f64> = BTreeMap::new();

    for transaction in transactions {
        *totals
            .entry((
                transaction.category.as_str(),
                transaction.transaction_type,
            ))
            .or_insert(0.0) += transaction.amount;
    }

    let mut breakdown: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|((category, transaction_type), total)| CategoryTotal {
            category: category.to_owned(),
            transaction_type,
            total,
        })
        .collect();

    breakdown.sort_by(|a, b| b.total.total_cmp(&a.total));

    breakdown
}

/// The income, expense, and net totals for one month of the trends chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotals {
    /// The month the totals cover.
    pub month: MonthKey,
    /// The summed income for the month.
    pub income: f64,
    /// The summed expenses for the month.
    pub expenses: f64,
    /// `income - expenses`.
    pub net: f64,
}

/// Compute per-month totals over `transactions` for each month in `months`.
///
/// Months without any transactions get zero totals so chart series stay
/// aligned with their axis labels.
pub fn monthly_series(transactions: &[Transaction], months: &[MonthKey]) -> Vec<MonthlyTotals> {
    months
        .iter()
        .map(|&month| {
            let in_month: Vec<Transaction> = transactions
                .iter()
                .filter(|transaction| month.contains(transaction.date))
                .cloned()
                .collect();

            let income = sum_amounts(&in_month, TransactionType::Income);
            let expenses = sum_amounts(&in_month, TransactionType::Expense);

            MonthlyTotals {
                month,
                income,
                expenses,
                net: income - expenses,
            }
        })
        .collect()
}

/// The last twelve months up to and including the month of `today`, oldest
/// first.
pub fn last_twelve_months(today: Date) -> Vec<MonthKey> {
    let mut month = MonthKey::from_date(today);
    let mut months = vec![month];

    for _ in 0..11 {
        month = month.previous();
        months.push(month);
    }

    months.reverse();
    months
}

/// The distinct months that have at least one transaction, newest first.
///
/// Used to populate the month filter dropdowns.
pub fn months_with_transactions(transactions: &[Transaction]) -> Vec<MonthKey> {
    let mut months: Vec<MonthKey> = transactions
        .iter()
        .map(|transaction| MonthKey::from_date(transaction.date))
        .collect();

    months.sort_unstable();
    months.dedup();
    months.reverse();

    months
}

/// The mean transaction size over the filtered set, counting income and
/// expenses alike. Zero when there are no transactions.
pub fn average_transaction(stats: &FinanceStats) -> f64 {
    if stats.transactions.is_empty() {
        return 0.0;
    }

    (stats.total_income + stats.total_expenses) / stats.transactions.len() as f64
}

/// Expenses as a percentage of income, or `None` when there is no income to
/// compare against.
pub fn expense_ratio(stats: &FinanceStats) -> Option<f64> {
    if stats.total_income > 0.0 {
        Some(stats.total_expenses / stats.total_income * 100.0)
    } else {
        None
    }
}

#[cfg(test)]
mod month_key_tests {
    use time::macros::date;

    use crate::Error;

    use super::MonthKey;

    #[test]
    fn parses_year_and_month() {
        let month: MonthKey = "2024-03".parse().unwrap();

        assert!(month.contains(date!(2024 - 03 - 01)));
        assert!(month.contains(date!(2024 - 03 - 31)));
        assert!(!month.contains(date!(2024 - 04 - 01)));
        assert!(!month.contains(date!(2023 - 03 - 15)));
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["2024", "2024-13", "2024-00", "march", "2024-3x", ""] {
            let result = input.parse::<MonthKey>();
            assert_eq!(
                result,
                Err(Error::InvalidMonthFilter(input.to_owned())),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        let month = MonthKey::from_date(date!(2025 - 01 - 31));

        assert_eq!(month.to_string(), "2025-01");
        assert_eq!("2025-01".parse::<MonthKey>().unwrap(), month);
    }

    #[test]
    fn previous_wraps_year_boundary() {
        let january: MonthKey = "2025-01".parse().unwrap();

        assert_eq!(january.previous().to_string(), "2024-12");
    }

    #[test]
    fn labels_spell_out_the_month() {
        let month: MonthKey = "2025-03".parse().unwrap();

        assert_eq!(month.label(), "March 2025");
        assert_eq!(month.short_label(), "Mar 2025");
    }
}

#[cfg(test)]
mod stats_tests {
    use time::macros::date;

    use crate::transaction::{Transaction, TransactionType};

    use super::{
        StatsFilter, average_transaction, calculate_stats, category_breakdown, expense_ratio,
        last_twelve_months, monthly_series, months_with_transactions,
    };

    fn transaction(
        id: i64,
        amount: f64,
        transaction_type: TransactionType,
        category: &str,
        date: time::Date,
    ) -> Transaction {
        Transaction {
            id,
            title: format!("Transaction {id}"),
            amount,
            transaction_type,
            category: category.to_owned(),
            date,
            notes: None,
        }
    }

    fn sample_transactions() -> Vec<Transaction> {
        // Stored newest first, matching the order the store keeps.
        vec![
            transaction(
                4,
                200.0,
                TransactionType::Expense,
                "Food & Dining",
                date!(2024 - 02 - 10),
            ),
            transaction(
                3,
                1000.0,
                TransactionType::Income,
                "Freelance",
                date!(2024 - 02 - 05),
            ),
            transaction(
                2,
                150.0,
                TransactionType::Expense,
                "Transportation",
                date!(2024 - 01 - 20),
            ),
            transaction(
                1,
                2500.0,
                TransactionType::Income,
                "Salary",
                date!(2024 - 01 - 15),
            ),
        ]
    }

    #[test]
    fn empty_filter_totals_everything() {
        let stats = calculate_stats(&sample_transactions(), &StatsFilter::default());

        assert_eq!(stats.total_income, 3500.0);
        assert_eq!(stats.total_expenses, 350.0);
        assert_eq!(stats.total_balance, 3150.0);
        assert_eq!(stats.transactions.len(), 4);
    }

    #[test]
    fn empty_collection_yields_zero_totals() {
        let stats = calculate_stats(&[], &StatsFilter::default());

        assert_eq!(stats.total_income, 0.0);
        assert_eq!(stats.total_expenses, 0.0);
        assert_eq!(stats.total_balance, 0.0);
        assert!(stats.transactions.is_empty());
    }

    #[test]
    fn month_filter_keeps_only_matching_dates() {
        let filter = StatsFilter {
            month: Some("2024-01".parse().unwrap()),
            category: None,
        };

        let stats = calculate_stats(&sample_transactions(), &filter);

        assert_eq!(stats.total_income, 2500.0);
        assert_eq!(stats.total_expenses, 150.0);
        assert_eq!(stats.total_balance, 2350.0);
        assert_eq!(stats.transactions.len(), 2);
    }

    #[test]
    fn category_filter_matches_exactly() {
        let filter = StatsFilter {
            month: None,
            category: Some("Salary".to_owned()),
        };

        let stats = calculate_stats(&sample_transactions(), &filter);

        assert_eq!(stats.transactions.len(), 1);
        assert_eq!(stats.total_income, 2500.0);
        assert_eq!(stats.total_expenses, 0.0);
    }

    #[test]
    fn filters_combine_with_and_semantics() {
        let filter = StatsFilter {
            month: Some("2024-02".parse().unwrap()),
            category: Some("Freelance".to_owned()),
        };

        let stats = calculate_stats(&sample_transactions(), &filter);

        assert_eq!(stats.transactions.len(), 1);
        assert_eq!(stats.transactions[0].id, 3);

        // Same category in a different month matches nothing.
        let filter = StatsFilter {
            month: Some("2024-01".parse().unwrap()),
            category: Some("Freelance".to_owned()),
        };

        let stats = calculate_stats(&sample_transactions(), &filter);
        assert!(stats.transactions.is_empty());
        assert_eq!(stats.total_balance, 0.0);
    }

    #[test]
    fn filtered_transactions_keep_stored_order() {
        let stats = calculate_stats(&sample_transactions(), &StatsFilter::default());

        let ids: Vec<i64> = stats.transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn recomputation_is_deterministic() {
        let transactions = sample_transactions();
        let filter = StatsFilter {
            month: Some("2024-02".parse().unwrap()),
            category: None,
        };

        let first = calculate_stats(&transactions, &filter);
        let second = calculate_stats(&transactions, &filter);

        assert_eq!(first, second);
    }

    #[test]
    fn breakdown_sorts_largest_first_and_splits_by_type() {
        let breakdown = category_breakdown(&sample_transactions());

        assert_eq!(breakdown.len(), 4);
        assert_eq!(breakdown[0].category, "Salary");
        assert_eq!(breakdown[0].total, 2500.0);
        assert_eq!(breakdown[1].category, "Freelance");
        assert_eq!(breakdown[3].category, "Transportation");
    }

    #[test]
    fn breakdown_keeps_income_and_expense_other_separate() {
        let transactions = vec![
            transaction(
                1,
                100.0,
                TransactionType::Income,
                "Other",
                date!(2024 - 01 - 01),
            ),
            transaction(
                2,
                40.0,
                TransactionType::Expense,
                "Other",
                date!(2024 - 01 - 02),
            ),
        ];

        let breakdown = category_breakdown(&transactions);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].transaction_type, TransactionType::Income);
        assert_eq!(breakdown[1].transaction_type, TransactionType::Expense);
    }

    #[test]
    fn monthly_series_zero_fills_quiet_months() {
        let months = vec![
            "2023-12".parse().unwrap(),
            "2024-01".parse().unwrap(),
            "2024-02".parse().unwrap(),
        ];

        let series = monthly_series(&sample_transactions(), &months);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].income, 0.0);
        assert_eq!(series[0].expenses, 0.0);
        assert_eq!(series[1].income, 2500.0);
        assert_eq!(series[1].expenses, 150.0);
        assert_eq!(series[2].net, 800.0);
    }

    #[test]
    fn last_twelve_months_spans_year_boundary() {
        let months = last_twelve_months(date!(2024 - 02 - 29));

        assert_eq!(months.len(), 12);
        assert_eq!(months[0].to_string(), "2023-03");
        assert_eq!(months[11].to_string(), "2024-02");
    }

    #[test]
    fn months_with_transactions_are_distinct_and_newest_first() {
        let months = months_with_transactions(&sample_transactions());

        let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, vec!["2024-02", "2024-01"]);
    }

    #[test]
    fn average_counts_income_and_expenses_alike() {
        let stats = calculate_stats(&sample_transactions(), &StatsFilter::default());

        assert_eq!(average_transaction(&stats), (3500.0 + 350.0) / 4.0);

        let empty = calculate_stats(&[], &StatsFilter::default());
        assert_eq!(average_transaction(&empty), 0.0);
    }

    #[test]
    fn expense_ratio_is_none_without_income() {
        let stats = calculate_stats(&sample_transactions(), &StatsFilter::default());
        assert_eq!(expense_ratio(&stats), Some(10.0));

        let expenses_only = vec![transaction(
            1,
            50.0,
            TransactionType::Expense,
            "Travel",
            date!(2024 - 01 - 01),
        )];
        let stats = calculate_stats(&expenses_only, &StatsFilter::default());
        assert_eq!(expense_ratio(&stats), None);
    }
}
