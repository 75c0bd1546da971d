//! Rently is a web app for managing a rental: it shows tenants their monthly
//! payment summary and lets them manage the bank details used for paying and
//! receiving rent.
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
mod auth_cookie;
mod auth_middleware;
mod bank_details;
mod database_id;
mod db;
mod endpoints;
mod html;
mod log_in;
mod log_out;
mod logging;
mod navigation;
mod not_found;
mod notification;
mod password;
mod payment_summary;
mod register_user;
mod routing;
#[cfg(test)]
mod test_utils;
mod user;

pub use app_state::AppState;
pub use bank_details::{
    BankDetails, BankDetailsFields, BankDetailsRepository, BankDetailsSession, Outcome,
    SqliteBankDetailsRepository,
};
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use notification::{Notification, NotificationLog, Notifier, Severity};
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use user::{User, UserID, get_user_by_id};

use crate::{html::error_view, not_found::get_404_not_found_response};

/// Wait for ctrl+c or SIGTERM, whichever arrives first, then ask the server
/// behind `handle` to shut down gracefully.
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
        _ = ctrl_c => tracing::debug!("Received ctrl+c signal."),
        _ = terminate => tracing::debug!("Received terminate signal."),
    }

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email and password combination did not match a registered user.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The request is missing the user ID or expiry auth cookie.
    #[error("auth cookie missing from the request")]
    CookieMissing,

    /// The expiry date in the auth cookie could not be parsed or formatted.
    /// Holds the underlying error and the offending date string.
    #[error("could not parse expiry cookie date-time \"{1}\": {0}")]
    InvalidDateFormat(String, String),

    /// The chosen password is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// The password hashing library failed. Log the detail server-side; the
    /// client should only ever see a generic internal error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The email already belongs to a registered user.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// The requested resource does not exist. Queries that return no rows map
    /// to this variant.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Any SQL error without more specific handling.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The database mutex was poisoned.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An update targeted bank details that are not in the database.
    #[error("tried to update bank details that are not in the database")]
    UpdateMissingBankDetails,

    /// A delete targeted bank details that are not in the database.
    #[error("tried to delete bank details that are not in the database")]
    DeleteMissingBankDetails,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_view(
                        "Internal Server Error",
                        "500",
                        "Sorry, something went wrong.",
                        "Try again later or check the server logs",
                    ),
                )
                    .into_response()
            }
        }
    }
}
