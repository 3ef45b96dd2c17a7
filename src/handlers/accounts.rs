//! Account HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - GET /accounts - List registered account numbers
//! - POST /accounts - Create a new account
//! - GET /accounts/:account_number/balance - Balance inquiry
//! - POST /accounts/:account_number/withdraw - Remove money
//! - POST /accounts/:account_number/deposit - Add money

use crate::{
    error::AppError,
    models::account::{
        AccountListResponse, AmountRequest, BalanceResponse, CreateAccountRequest,
        TransactionResponse,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// List all registered account numbers.
///
/// # Response (200 OK)
///
/// ```json
/// { "accounts": ["123456", "345678", "789012"] }
/// ```
///
/// Account numbers are sorted so repeated calls return a stable order.
pub async fn list_accounts(State(state): State<AppState>) -> Json<AccountListResponse> {
    let mut accounts = state.registry.list_identifiers();
    accounts.sort();

    Json(AccountListResponse { accounts })
}

/// Create a new account.
///
/// # Request Body
///
/// ```json
/// {
///   "account_number": "555000",
///   "initial_balance": 250.00  // optional, defaults to 0
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the account number and balance
/// - **Error (400)**: Blank account number or negative opening balance
/// - **Error (409)**: Account number already registered
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<BalanceResponse>), AppError> {
    let account_number = request.account_number.trim();
    if account_number.is_empty() {
        return Err(AppError::InvalidRequest(
            "account_number must not be blank".to_string(),
        ));
    }

    let account = state
        .registry
        .create_account(account_number, request.initial_balance)
        .inspect_err(|err| tracing::warn!("Create account rejected: {}", err))?;
    tracing::info!("Account {} created", account.identifier());

    Ok((StatusCode::CREATED, Json(BalanceResponse::from(&*account))))
}

/// Get the current balance of an account.
///
/// # Response
///
/// - **Success (200 OK)**: `{"account_number": "123456", "balance": 1000.0}`
/// - **Error (404)**: Account not found
pub async fn get_balance(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<BalanceResponse>, AppError> {
    let account = state.registry.get_account(&account_number)?;

    Ok(Json(BalanceResponse::from(&*account)))
}

/// Withdraw money from an account.
///
/// # Request Body
///
/// ```json
/// { "amount": 100.00 }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: confirmation message and new balance
/// - **Error (400)**: Non-positive amount or insufficient funds
/// - **Error (404)**: Account not found
pub async fn withdraw(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    let account = state.registry.get_account(&account_number)?;

    let receipt = account.withdraw(request.amount).inspect_err(|err| {
        tracing::warn!("Withdrawal from {} rejected: {}", account_number, err)
    })?;
    tracing::info!("Account {}: {}", account_number, receipt.message());

    Ok(Json(TransactionResponse::new(&account_number, &receipt)))
}

/// Deposit money into an account.
///
/// Same request and response shapes as [`withdraw`]; only a non-positive
/// amount is rejected.
pub async fn deposit(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    let account = state.registry.get_account(&account_number)?;

    let receipt = account.deposit(request.amount).inspect_err(|err| {
        tracing::warn!("Deposit to {} rejected: {}", account_number, err)
    })?;
    tracing::info!("Account {}: {}", account_number, receipt.message());

    Ok(Json(TransactionResponse::new(&account_number, &receipt)))
}
