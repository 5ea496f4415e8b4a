//! Reward Points is a web app that shows the loyalty reward points customers
//! earned from their purchases, month by month.
//!
//! This library provides a REST API that directly serves HTML pages, plus a
//! JSON view of the same data. Purchase transactions are fetched from a
//! transaction feed, either over HTTP or from a local data file, and
//! aggregated per customer and per calendar month on every request.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod aggregation;
mod app_state;
mod endpoints;
mod error_page;
mod feed;
mod html;
mod logging;
mod not_found;
mod reward;
mod reward_points;
mod routing;
mod source;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use aggregation::{CustomerSummary, MONTH_NAMES, MonthEntry, aggregate, month_name};
pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use reward::calculate_points;
pub use reward_points::RewardPoints;
pub use routing::build_router;
pub use source::{DEFAULT_SOURCE_URL, TransactionSource};
pub use transaction::{
    CustomerId, InvalidReason, InvalidRecord, RawTransaction, Transaction, ValidationResult,
    parse_transaction_date, validate_transactions,
};

use crate::{error_page::ErrorPage, not_found::get_404_not_found_response};

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
    /// The transaction feed could not be reached, e.g. the connection was
    /// refused or timed out.
    #[error("could not reach the transaction feed: {0}")]
    SourceUnavailable(String),

    /// The transaction feed responded with a non-success status code.
    #[error("the transaction feed responded with status {0}")]
    SourceStatus(u16),

    /// The transaction feed did not contain a list of transaction records.
    ///
    /// Individual records with bad amounts or dates do not cause this error,
    /// they are skipped and reported instead.
    #[error("could not parse the transaction feed: {0}")]
    InvalidFeed(String),

    /// The local transaction data file could not be read or has an
    /// unsupported file type.
    #[error("could not load the transaction data file: {0}")]
    DataFile(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::SourceUnavailable(_) | Error::SourceStatus(_) | Error::InvalidFeed(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::DataFile(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Convert the error into a JSON response for API clients.
    fn into_json_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("An error occurred while serving an API request: {self}");
        }

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::SourceUnavailable(_) | Error::SourceStatus(_) | Error::InvalidFeed(_) => {
                tracing::error!("Could not load transactions: {self}");
                ErrorPage {
                    status_code,
                    description: "Could not load transactions",
                    fix: "The transaction feed is unavailable or sent data in an unexpected \
                        format. Check that the feed is running and try again.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                ErrorPage::default().into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn feed_errors_are_bad_gateway() {
        for error in [
            Error::SourceUnavailable("connection refused".to_owned()),
            Error::SourceStatus(503),
            Error::InvalidFeed("expected an array".to_owned()),
        ] {
            assert_eq!(error.into_response().status(), StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn data_file_errors_are_internal_server_errors() {
        let response = Error::DataFile("missing".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_is_404() {
        assert_eq!(
            Error::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn json_errors_include_message() {
        let response = Error::SourceStatus(500).into_json_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["error"],
            "the transaction feed responded with status 500"
        );
    }
}
