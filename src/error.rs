//! Error types and HTTP error response handling.
//!
//! This module defines the HTTP-facing error type and how it is converted
//! into responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::account::AccountError;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Account Errors**: rejected account or registry operations
/// - **Validation Errors**: request data that never reaches the registry
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Account or registry operation was rejected.
    ///
    /// `NotFound` returns HTTP 404, `AlreadyExists` returns HTTP 409, and
    /// every other variant returns HTTP 400.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Account(AccountError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "account_not_found")
            }
            AppError::Account(AccountError::AlreadyExists(_)) => {
                (StatusCode::CONFLICT, "account_exists")
            }
            AppError::Account(AccountError::InsufficientFunds) => {
                (StatusCode::BAD_REQUEST, "insufficient_funds")
            }
            AppError::Account(
                AccountError::InvalidAmount { .. }
                | AccountError::AmountTooLarge
                | AccountError::NegativeInitialBalance,
            ) => (StatusCode::BAD_REQUEST, "invalid_amount"),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "insufficient_funds",
///     "message": "Insufficient funds"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match self {
            AppError::InvalidRequest(msg) => msg,
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::Operation;
    use rstest::rstest;

    #[rstest]
    #[case(AccountError::NotFound("1".into()), StatusCode::NOT_FOUND, "account_not_found")]
    #[case(AccountError::AlreadyExists("1".into()), StatusCode::CONFLICT, "account_exists")]
    #[case(AccountError::InsufficientFunds, StatusCode::BAD_REQUEST, "insufficient_funds")]
    #[case(
        AccountError::InvalidAmount { operation: Operation::Deposit },
        StatusCode::BAD_REQUEST,
        "invalid_amount"
    )]
    #[case(AccountError::AmountTooLarge, StatusCode::BAD_REQUEST, "invalid_amount")]
    #[case(AccountError::NegativeInitialBalance, StatusCode::BAD_REQUEST, "invalid_amount")]
    fn account_errors_map_to_status(
        #[case] err: AccountError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        assert_eq!(AppError::from(err).status_and_code(), (status, code));
    }

    #[test]
    fn invalid_request_keeps_its_detail() {
        let response = AppError::InvalidRequest("account_number must not be blank".into())
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
