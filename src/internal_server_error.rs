//! Defines the templates and route handlers for the page to display for an internal server error.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::{error_view, render};

pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        render_internal_server_error(self)
    }
}

pub fn render_internal_server_error(error: InternalServerError) -> Response {
    render(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view("Internal Server Error", "500", error.description, error.fix),
    )
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}
