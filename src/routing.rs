//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    preferences::{get_settings_page, update_preferences_endpoint},
    reports::get_reports_page,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_page, get_new_transaction_page, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::SETTINGS_API, post(update_preferences_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum_test::TestServer;

    use crate::{AppState, endpoints, routing::build_router};

    fn test_server() -> TestServer {
        let router = build_router(AppState::new_in_memory());

        TestServer::new(router)
    }

    #[tokio::test]
    async fn coffee_is_a_teapot() {
        let server = test_server();

        let response = server.get(endpoints::COFFEE).await;

        response.assert_status(axum::http::StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn unknown_route_returns_404_page() {
        let server = test_server();

        let response = server.get("/definitely/not/a/route").await;

        response.assert_status(axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn dashboard_renders() {
        let server = test_server();

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status_ok();
        assert!(response.text().contains("Dashboard"));
    }

    #[tokio::test]
    async fn settings_page_renders() {
        let server = test_server();

        let response = server.get(endpoints::SETTINGS_VIEW).await;

        response.assert_status_ok();
        assert!(response.text().contains("Settings"));
    }
}
