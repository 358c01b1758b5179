//! Error-to-response mapping for the HTTP surface
//!
//! All failures funnel through [`ApiError`]: validation and write failures
//! answer with a flash-style JSON message, missing resources and unknown
//! routes answer with the dedicated 404 page, everything else with the
//! dedicated 500 page. Error detail is logged server-side and never sent to
//! the client.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use showbill_common::Error;
use tracing::{error, info};

use crate::api::handlers::MessageResponse;

const NOT_FOUND_HTML: &str = include_str!("pages/not_found.html");
const SERVER_ERROR_HTML: &str = include_str!("pages/server_error.html");

/// Generic retry message shown on any validation failure
pub const RETRY_MESSAGE: &str = "An error occurred. Check form inputs and try again.";

/// Convenience Result type for handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// How a failed request is answered
#[derive(Debug)]
pub enum ApiError {
    /// Flash-style JSON message with the given status
    Flash { status: StatusCode, message: String },
    /// Dedicated 404 page
    NotFound,
    /// Dedicated 500 page; detail stays in the server log
    Internal,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(what) => {
                info!("Not found: {what}");
                ApiError::NotFound
            }
            Error::InvalidInput(reason) => {
                info!("Rejected input: {reason}");
                ApiError::Flash {
                    status: StatusCode::BAD_REQUEST,
                    message: RETRY_MESSAGE.to_string(),
                }
            }
            other => {
                error!("Request failed: {other}");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Flash { status, message } => {
                (status, Json(MessageResponse::error(message))).into_response()
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_HTML)).into_response(),
            ApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR_HTML)).into_response()
            }
        }
    }
}

/// Map a write failure onto its flash message, keeping NotFound as a 404
///
/// The flash text names the record the way the forms talk about it; the
/// underlying error only reaches the log.
pub fn flash_failure(err: Error, message: String) -> ApiError {
    match err {
        Error::NotFound(what) => {
            info!("Not found: {what}");
            ApiError::NotFound
        }
        Error::InvalidInput(reason) => {
            info!("Rejected input: {reason}");
            ApiError::Flash {
                status: StatusCode::BAD_REQUEST,
                message: RETRY_MESSAGE.to_string(),
            }
        }
        other => {
            error!("Write failed: {other}");
            ApiError::Flash {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message,
            }
        }
    }
}
