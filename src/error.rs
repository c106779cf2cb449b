//! Handler-level errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors a page handler can fail with. Sheet fetch failures are not here:
/// they are handled per sheet and rendered as placeholder rows.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
