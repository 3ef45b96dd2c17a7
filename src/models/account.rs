//! Account entity, domain errors and API request/response types.
//!
//! This module defines:
//! - `Account`: a single balance holder with guarded withdraw/deposit
//! - `AccountError`: every way an account or registry operation can be rejected
//! - `Receipt`: the success payload of a balance mutation
//! - Request and response bodies used by the HTTP handlers

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Reasons an account or registry operation is rejected.
///
/// None of these are faults: every variant is a normal, recoverable outcome
/// that callers must check for explicitly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    /// Withdrawal or deposit amount was zero or negative.
    #[error("Invalid amount: {operation} amount must be positive")]
    InvalidAmount { operation: Operation },

    /// Deposit would push the balance past the largest representable amount.
    #[error("Invalid amount: deposit would exceed the maximum balance")]
    AmountTooLarge,

    /// Withdrawal amount exceeds the current balance.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Account creation was attempted with a negative opening balance.
    #[error("Initial balance cannot be negative")]
    NegativeInitialBalance,

    /// An account with this identifier is already registered.
    #[error("Account {0} already exists")]
    AlreadyExists(String),

    /// No account is registered under this identifier.
    #[error("Account {0} not found")]
    NotFound(String),
}

/// Kind of balance mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Withdrawal,
    Deposit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Withdrawal => f.write_str("withdrawal"),
            Operation::Deposit => f.write_str("deposit"),
        }
    }
}

/// Outcome of a successful withdrawal or deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub operation: Operation,
    pub amount: Decimal,

    /// Balance immediately after this operation was applied
    pub balance: Decimal,
}

impl Receipt {
    /// Human-readable confirmation, e.g.
    /// `Successfully withdrew $100.00. New balance: $900.00`.
    pub fn message(&self) -> String {
        let verb = match self.operation {
            Operation::Withdrawal => "withdrew",
            Operation::Deposit => "deposited",
        };
        format!(
            "Successfully {verb} ${}. New balance: ${}",
            format_money(self.amount),
            format_money(self.balance)
        )
    }
}

/// Render an amount with exactly two decimal places.
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// A single balance holder.
///
/// # Invariant
///
/// The balance is never negative. Every mutation checks and applies the
/// change while holding the account's own lock, so concurrent withdrawals
/// against the same account serialize and can never overdraw it.
#[derive(Debug)]
pub struct Account {
    identifier: String,
    balance: Mutex<Decimal>,
}

impl Account {
    /// Create an account. Callers are responsible for rejecting negative
    /// opening balances (see `AccountRegistry::create_account`).
    pub(crate) fn new(identifier: impl Into<String>, initial_balance: Decimal) -> Self {
        Self {
            identifier: identifier.into(),
            balance: Mutex::new(initial_balance),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn get_balance(&self) -> Decimal {
        *self.lock_balance()
    }

    /// Remove `amount` from the balance.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount`: amount is zero or negative
    /// - `InsufficientFunds`: amount is greater than the current balance
    ///
    /// The balance is left untouched on error.
    pub fn withdraw(&self, amount: Decimal) -> Result<Receipt, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                operation: Operation::Withdrawal,
            });
        }

        let mut balance = self.lock_balance();
        if amount > *balance {
            return Err(AccountError::InsufficientFunds);
        }
        *balance -= amount;

        Ok(Receipt {
            operation: Operation::Withdrawal,
            amount,
            balance: *balance,
        })
    }

    /// Add `amount` to the balance.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount`: amount is zero or negative
    /// - `AmountTooLarge`: the new balance would overflow
    ///
    /// The balance is left untouched on error.
    pub fn deposit(&self, amount: Decimal) -> Result<Receipt, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                operation: Operation::Deposit,
            });
        }

        let mut balance = self.lock_balance();
        *balance = balance
            .checked_add(amount)
            .ok_or(AccountError::AmountTooLarge)?;

        Ok(Receipt {
            operation: Operation::Deposit,
            amount,
            balance: *balance,
        })
    }

    // A poisoned lock still guards a valid balance: every write is a single
    // assignment made after all checks have passed.
    fn lock_balance(&self) -> MutexGuard<'_, Decimal> {
        self.balance.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_number": "555000",
///   "initial_balance": 250.00
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub account_number: String,

    /// Opening balance (defaults to 0 if not provided)
    #[serde(default)]
    pub initial_balance: Decimal,
}

/// Request body for withdraw and deposit.
///
/// ```json
/// { "amount": 100.00 }
/// ```
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Decimal,
}

/// Response body for balance inquiries and account creation.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub account_number: String,
    pub balance: Decimal,
}

impl From<&Account> for BalanceResponse {
    fn from(account: &Account) -> Self {
        Self {
            account_number: account.identifier().to_string(),
            balance: account.get_balance(),
        }
    }
}

/// Response body for a successful withdrawal or deposit.
///
/// # JSON Example
///
/// ```json
/// {
///   "success": true,
///   "message": "Successfully withdrew $100.00. New balance: $900.00",
///   "account_number": "123456",
///   "balance": 900.0
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub success: bool,
    pub message: String,
    pub account_number: String,
    pub balance: Decimal,
}

impl TransactionResponse {
    pub fn new(account_number: &str, receipt: &Receipt) -> Self {
        Self {
            success: true,
            message: receipt.message(),
            account_number: account_number.to_string(),
            balance: receipt.balance,
        }
    }
}

/// Response body for `GET /accounts`.
#[derive(Debug, Serialize)]
pub struct AccountListResponse {
    pub accounts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::thread;

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-1))]
    #[case(dec!(-0.01))]
    fn withdraw_rejects_non_positive_amounts(#[case] amount: Decimal) {
        let account = Account::new("123456", dec!(1000));

        let err = account.withdraw(amount).unwrap_err();

        assert_eq!(
            err,
            AccountError::InvalidAmount {
                operation: Operation::Withdrawal
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid amount: withdrawal amount must be positive"
        );
        assert_eq!(account.get_balance(), dec!(1000));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-250))]
    fn deposit_rejects_non_positive_amounts(#[case] amount: Decimal) {
        let account = Account::new("123456", dec!(1000));

        let err = account.deposit(amount).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid amount: deposit amount must be positive"
        );
        assert_eq!(account.get_balance(), dec!(1000));
    }

    #[test]
    fn withdraw_more_than_balance_fails_and_keeps_balance() {
        let account = Account::new("345678", dec!(500));

        let err = account.withdraw(dec!(500.01)).unwrap_err();

        assert_eq!(err, AccountError::InsufficientFunds);
        assert_eq!(err.to_string(), "Insufficient funds");
        assert_eq!(account.get_balance(), dec!(500));
    }

    #[test]
    fn withdraw_entire_balance_leaves_zero() {
        let account = Account::new("345678", dec!(500));

        let receipt = account.withdraw(dec!(500)).unwrap();

        assert_eq!(receipt.balance, Decimal::ZERO);
        assert_eq!(account.get_balance(), Decimal::ZERO);
    }

    #[test]
    fn deposit_past_maximum_balance_fails_and_keeps_balance() {
        let account = Account::new("123456", Decimal::MAX);

        let err = account.deposit(Decimal::ONE).unwrap_err();

        assert_eq!(err, AccountError::AmountTooLarge);
        assert_eq!(
            err.to_string(),
            "Invalid amount: deposit would exceed the maximum balance"
        );
        assert_eq!(account.get_balance(), Decimal::MAX);
    }

    #[test]
    fn deposit_then_withdraw_restores_balance() {
        let account = Account::new("789012", dec!(2500));

        account.deposit(dec!(123.45)).unwrap();
        account.withdraw(dec!(123.45)).unwrap();

        assert_eq!(account.get_balance(), dec!(2500));
    }

    #[test]
    fn receipt_messages_include_new_balance() {
        let account = Account::new("123456", dec!(1000));

        let withdrawal = account.withdraw(dec!(100)).unwrap();
        assert_eq!(
            withdrawal.message(),
            "Successfully withdrew $100.00. New balance: $900.00"
        );

        let deposit = account.deposit(dec!(0.5)).unwrap();
        assert_eq!(
            deposit.message(),
            "Successfully deposited $0.50. New balance: $900.50"
        );
    }

    #[test]
    fn format_money_rounds_to_cents() {
        assert_eq!(format_money(dec!(12)), "12.00");
        assert_eq!(format_money(dec!(12.345)), "12.35");
        assert_eq!(format_money(dec!(0.125)), "0.13");
        assert_eq!(format_money(dec!(0.1)), "0.10");
    }

    #[test]
    fn concurrent_withdrawals_never_overdraw() {
        let account = Arc::new(Account::new("123456", dec!(1000)));

        let successes: usize = thread::scope(|scope| {
            let handles: Vec<_> = (0..25)
                .map(|_| {
                    let account = Arc::clone(&account);
                    scope.spawn(move || account.withdraw(dec!(100)).is_ok())
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| usize::from(handle.join().unwrap()))
                .sum()
        });

        assert_eq!(successes, 10);
        assert_eq!(account.get_balance(), Decimal::ZERO);
    }

    #[test]
    fn concurrent_deposits_do_not_lose_updates() {
        let account = Arc::new(Account::new("789012", Decimal::ZERO));

        thread::scope(|scope| {
            for _ in 0..16 {
                let account = Arc::clone(&account);
                scope.spawn(move || {
                    for _ in 0..100 {
                        account.deposit(dec!(1)).unwrap();
                    }
                });
            }
        });

        assert_eq!(account.get_balance(), dec!(1600));
    }
}
