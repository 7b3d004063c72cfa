//! Defines the core data models for transactions.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// Whether a transaction brought money in or took money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. salary or an investment payout.
    Income,
    /// Money spent, e.g. groceries or rent.
    Expense,
}

/// The categories users can assign to income transactions.
pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Investment",
    "Business",
    "Gift",
    "Other",
];

/// The categories users can assign to expense transactions.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Health",
    "Travel",
    "Education",
    "Other",
];

impl TransactionType {
    /// The fixed list of categories allowed for this transaction type.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            TransactionType::Income => INCOME_CATEGORIES,
            TransactionType::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// The label to display for this transaction type.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// IDs are assigned by the store, use [TransactionDraft] for records that have
/// not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short description of what the transaction was for.
    pub title: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Always positive, the direction of the money flow is recorded by
    /// `transaction_type`.
    pub amount: f64,
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// Free-form notes about the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A transaction that has not been given an ID yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// A short description of what the transaction was for.
    pub title: String,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// Whether the transaction is an income or an expense.
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// Free-form notes about the transaction.
    pub notes: Option<String>,
}

impl TransactionDraft {
    /// Check the draft against the form validation rules.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyTitle] if the title is empty or whitespace,
    /// - [Error::NonPositiveAmount] if the amount is zero or negative,
    /// - [Error::InvalidCategory] if the category is not in the allowed list
    ///   for the transaction type.
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        if self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        if !self
            .transaction_type
            .categories()
            .contains(&self.category.as_str())
        {
            return Err(Error::InvalidCategory(self.category.clone()));
        }

        Ok(())
    }
}

/// A partial update to a transaction.
///
/// Fields set to `None` are left unchanged by [crate::transaction::TransactionStore::update].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    /// Replacement title, if any.
    pub title: Option<String>,
    /// Replacement amount, if any.
    pub amount: Option<f64>,
    /// Replacement transaction type, if any.
    pub transaction_type: Option<TransactionType>,
    /// Replacement category, if any.
    pub category: Option<String>,
    /// Replacement date, if any.
    pub date: Option<Date>,
    /// Replacement notes. The outer `Option` is the patch, the inner one the
    /// new value, so `Some(None)` clears the notes.
    pub notes: Option<Option<String>>,
}

#[cfg(test)]
mod draft_tests {
    use time::macros::date;

    use crate::Error;

    use super::{TransactionDraft, TransactionType};

    fn valid_draft() -> TransactionDraft {
        TransactionDraft {
            title: "Weekly groceries".to_owned(),
            amount: 54.20,
            transaction_type: TransactionType::Expense,
            category: "Food & Dining".to_owned(),
            date: date!(2025 - 06 - 14),
            notes: None,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert_eq!(valid_draft().validate(), Ok(()));
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut draft = valid_draft();
        draft.title = "   ".to_owned();

        assert_eq!(draft.validate(), Err(Error::EmptyTitle));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        for amount in [0.0, -12.5] {
            let mut draft = valid_draft();
            draft.amount = amount;

            assert_eq!(draft.validate(), Err(Error::NonPositiveAmount(amount)));
        }
    }

    #[test]
    fn category_must_match_transaction_type() {
        // Salary is a valid income category but not a valid expense category.
        let mut draft = valid_draft();
        draft.category = "Salary".to_owned();

        assert_eq!(
            draft.validate(),
            Err(Error::InvalidCategory("Salary".to_owned()))
        );

        draft.transaction_type = TransactionType::Income;
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut draft = valid_draft();
        draft.category = "Yachts".to_owned();

        assert_eq!(
            draft.validate(),
            Err(Error::InvalidCategory("Yachts".to_owned()))
        );
    }
}
