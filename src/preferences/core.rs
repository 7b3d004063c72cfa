//! Defines the user preferences data model.

use serde::{Deserialize, Serialize};

/// The currencies amounts can be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian rupee.
    Inr,
    /// United States dollar.
    Usd,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
}

/// The currencies offered on the settings page, in display order.
pub const CURRENCIES: &[Currency] = &[Currency::Inr, Currency::Usd, Currency::Eur, Currency::Gbp];

impl Currency {
    /// The symbol shown next to amounts, e.g. "₹".
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    /// The currency code, e.g. "INR".
    pub fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// The full name shown on the settings page.
    pub fn name(self) -> &'static str {
        match self {
            Currency::Inr => "Indian Rupee",
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
        }
    }
}

/// The display and notification settings, persisted as a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// The currency amounts are displayed in.
    pub currency: Currency,
    /// The display language as an ISO 639-1 code.
    pub language: String,
    /// Whether the dark color scheme is forced on.
    pub dark_mode: bool,
    /// Whether notifications are enabled at all.
    pub notifications: bool,
    /// Whether to alert when spending approaches a budget.
    pub budget_alerts: bool,
    /// Whether to send a weekly summary report.
    pub weekly_reports: bool,
    /// Whether to alert on unusually large transactions.
    pub large_transactions: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency: Currency::Inr,
            language: "en".to_owned(),
            dark_mode: false,
            notifications: true,
            budget_alerts: true,
            weekly_reports: true,
            large_transactions: false,
        }
    }
}
