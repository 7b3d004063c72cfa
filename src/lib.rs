//! Ledgerly is a web app for tracking personal income and expenses.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod preferences;
mod reports;
mod routing;
mod stats;
mod storage;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use routing::build_router;

use crate::{
    alert::Alert,
    html::render,
    internal_server_error::{InternalServerError, render_internal_server_error},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used as a transaction title.
    #[error("transaction title cannot be empty")]
    EmptyTitle,

    /// A zero or negative amount was used for a transaction.
    ///
    /// Amounts are always positive, the transaction type records whether money
    /// came in or went out.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    NonPositiveAmount(f64),

    /// A category was used that is not in the allowed list for the
    /// transaction's type.
    #[error("\"{0}\" is not a valid category for this transaction type")]
    InvalidCategory(String),

    /// A month filter string could not be parsed as a year and month.
    #[error("could not parse \"{0}\" as a month, expected the format YYYY-MM")]
    InvalidMonthFilter(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An error occurred while reading or writing a data file.
    #[error("could not access the data file: {0}")]
    StorageError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the lock on a store
    #[error("could not acquire the store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while saving the user's preferences.
    #[error("failed to save preferences")]
    PreferencesSaveError,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the store")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the store")]
    DeleteMissingTransaction,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::PreferencesSaveError => render_internal_server_error(InternalServerError {
                description: "Save Failed",
                fix: "Failed to save your preferences. Please try again.",
            }),
            Error::InvalidTimezoneError(timezone) => {
                render_internal_server_error(InternalServerError {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                })
            }
            Error::StoreLockError => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                )
                .into_html(),
            ),
            Error::EmptyTitle => render(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid transaction title",
                    "The title cannot be empty. Enter a short description of the transaction.",
                )
                .into_html(),
            ),
            Error::NonPositiveAmount(amount) => render(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid transaction amount",
                    &format!("{amount} is not a valid amount. Enter an amount greater than zero."),
                )
                .into_html(),
            ),
            Error::InvalidCategory(category) => render(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid category",
                    &format!(
                        "\"{category}\" is not a valid category for this transaction type. \
                        Choose a category from the list."
                    ),
                )
                .into_html(),
            ),
            Error::UpdateMissingTransaction => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update transaction",
                    "The transaction could not be found.",
                )
                .into_html(),
            ),
            Error::DeleteMissingTransaction => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                )
                .into_html(),
            ),
            _ => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_html(),
            ),
        }
    }
}
