//! The form fields shared by the create and edit transaction pages.

use maud::{Markup, html};
use time::Date;

use crate::{
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::core::{EXPENSE_CATEGORIES, INCOME_CATEGORIES, TransactionType},
};

/// The values to prefill the transaction form with.
///
/// The create page uses [TransactionFormValues::empty], the edit page fills
/// these from the stored transaction.
#[derive(Debug, Clone)]
pub struct TransactionFormValues<'a> {
    /// The selected transaction type.
    pub transaction_type: TransactionType,
    /// The title field contents.
    pub title: &'a str,
    /// The amount field contents, empty when `None`.
    pub amount: Option<f64>,
    /// The selected category, none selected when `None`.
    pub category: Option<&'a str>,
    /// The date field contents.
    pub date: Date,
    /// The notes field contents.
    pub notes: &'a str,
}

impl TransactionFormValues<'_> {
    /// An empty form defaulting to an expense dated `date`.
    pub fn empty(date: Date) -> Self {
        Self {
            transaction_type: TransactionType::Expense,
            title: "",
            amount: None,
            category: None,
            date,
            notes: "",
        }
    }
}

fn type_radio(
    transaction_type: TransactionType,
    value: &str,
    selected: TransactionType,
) -> Markup {
    let id = format!("type-{value}");

    html! {
        div class="flex flex-1 items-center"
        {
            input
                name="transaction_type"
                id=(id)
                type="radio"
                value=(value)
                checked[transaction_type == selected]
                class=(format!("sr-only {FORM_RADIO_INPUT_STYLE}"));

            label for=(id) class=(format!("text-center {FORM_RADIO_LABEL_STYLE}"))
            {
                (transaction_type.label())
            }
        }
    }
}

fn category_options(categories: &[&str], selected: Option<&str>) -> Markup {
    html! {
        @for &category in categories {
            option value=(category) selected[Some(category) == selected] { (category) }
        }
    }
}

/// The shared field set for the transaction forms.
///
/// The caller provides the surrounding `form` element so the create and edit
/// pages can point it at different endpoints. `max_date` caps the date picker
/// at the current local date.
pub fn transaction_form_fields(values: &TransactionFormValues, max_date: Date) -> Markup {
    html! {
        fieldset
        {
            legend class=(FORM_LABEL_STYLE) { "Type" }

            div class=(format!("sm:flex-row {FORM_RADIO_GROUP_STYLE}"))
            {
                (type_radio(TransactionType::Expense, "expense", values.transaction_type))
                (type_radio(TransactionType::Income, "income", values.transaction_type))
            }
        }

        div
        {
            label
                for="title"
                class=(FORM_LABEL_STYLE)
            {
                "Title"
            }

            input
                name="title"
                id="title"
                type="text"
                placeholder="e.g. Weekly groceries"
                required
                autofocus
                value=(values.title)
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    min="0.01"
                    step="0.01"
                    placeholder="0.00"
                    required
                    value=[values.amount]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" disabled selected[values.category.is_none()]
                {
                    "Select a category"
                }

                optgroup label="Expense"
                {
                    (category_options(EXPENSE_CATEGORIES, values.category))
                }

                optgroup label="Income"
                {
                    (category_options(INCOME_CATEGORIES, values.category))
                }
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                max=(max_date)
                required
                value=(values.date)
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="notes"
                class=(FORM_LABEL_STYLE)
            {
                "Notes (optional)"
            }

            textarea
                name="notes"
                id="notes"
                rows="3"
                placeholder="Anything worth remembering about this transaction"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                (values.notes)
            }
        }
    }
}
