//! Alert system for displaying success and error messages to users.
//!
//! Alerts are returned as HTML partials targeted at the `#alert-container`
//! element via the htmx response-targets extension.

use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// An alert message with appropriate styling
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub kind: AlertKind,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new success alert
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            kind: AlertKind::Success,
            message,
            details,
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            kind: AlertKind::Error,
            message,
            details,
        }
    }

    pub fn into_html(self) -> Markup {
        let (container_style, icon) = match self.kind {
            AlertKind::Success => (
                "flex items-start gap-3 p-4 mb-4 rounded-lg border \
                border-green-300 bg-green-50 text-green-800 \
                dark:border-green-800 dark:bg-gray-800 dark:text-green-400",
                "✓",
            ),
            AlertKind::Error => (
                "flex items-start gap-3 p-4 mb-4 rounded-lg border \
                border-red-300 bg-red-50 text-red-800 \
                dark:border-red-800 dark:bg-gray-800 dark:text-red-400",
                "!",
            ),
        };

        html! {
            div
                id="alert"
                role="alert"
                class=(container_style)
            {
                span class="font-bold" aria-hidden="true" { (icon) }

                div
                {
                    p class="font-semibold" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="text-sm" { (self.details) }
                    }
                }
            }
        }
    }
}
