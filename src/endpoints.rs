//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The root route which redirects to the dashboard page.
pub const ROOT: &str = "/";
/// The landing page with the balance overview.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for displaying the user's transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The page with charts and summary statistics.
pub const REPORTS_VIEW: &str = "/reports";
/// The page for editing the user's preferences.
pub const SETTINGS_VIEW: &str = "/settings";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to update the user's preferences.
pub const SETTINGS_API: &str = "/api/settings";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::REPORTS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::SETTINGS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::COFFEE);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::SETTINGS_API);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
