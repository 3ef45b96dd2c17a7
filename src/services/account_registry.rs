//! Account registry - owner of every account in the process.
//!
//! The registry is constructed once by process bootstrap, seeded once, and
//! then shared with the HTTP layer through `AppState`. There is no ambient
//! global instance.
//!
//! # Locking
//!
//! - The identifier map and the `seeded` flag live behind one `RwLock`.
//!   Lookups take the read lock; create, seed and reset take the write lock.
//! - Each account guards its own balance, so balance arithmetic never holds
//!   the registry lock.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;

use crate::models::account::{Account, AccountError, format_money};
use crate::services::seed_loader;

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, Arc<Account>>,
    seeded: bool,
}

impl Inner {
    fn insert(
        &mut self,
        identifier: &str,
        initial_balance: Decimal,
    ) -> Result<Arc<Account>, AccountError> {
        if self.accounts.contains_key(identifier) {
            return Err(AccountError::AlreadyExists(identifier.to_string()));
        }
        if initial_balance < Decimal::ZERO {
            return Err(AccountError::NegativeInitialBalance);
        }

        let account = Arc::new(Account::new(identifier, initial_balance));
        self.accounts
            .insert(identifier.to_string(), Arc::clone(&account));
        Ok(account)
    }
}

/// Process-wide map from identifier to account.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    inner: RwLock<Inner>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists`: identifier is already registered (the existing
    ///   account is left untouched)
    /// - `NegativeInitialBalance`: `initial_balance` is below zero
    pub fn create_account(
        &self,
        identifier: &str,
        initial_balance: Decimal,
    ) -> Result<Arc<Account>, AccountError> {
        let account = self.write().insert(identifier, initial_balance)?;
        tracing::debug!(
            "Account {} created successfully with balance ${}",
            identifier,
            format_money(initial_balance)
        );
        Ok(account)
    }

    /// Look up an account.
    ///
    /// The returned handle is shared with the registry and with any other
    /// request holding it.
    pub fn get_account(&self, identifier: &str) -> Result<Arc<Account>, AccountError> {
        self.read()
            .accounts
            .get(identifier)
            .cloned()
            .ok_or_else(|| AccountError::NotFound(identifier.to_string()))
    }

    #[cfg(test)]
    pub fn account_exists(&self, identifier: &str) -> bool {
        self.read().accounts.contains_key(identifier)
    }

    /// All registered identifiers, in no particular order.
    pub fn list_identifiers(&self) -> Vec<String> {
        self.read().accounts.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_seeded(&self) -> bool {
        self.read().seeded
    }

    /// Populate the registry from a seed file.
    ///
    /// Does nothing if the registry has already been seeded or already holds
    /// accounts. Individual entries that cannot be created (e.g. an
    /// identifier listed twice) are logged and skipped.
    ///
    /// Returns the number of accounts created.
    pub fn seed_from(&self, path: impl AsRef<Path>) -> usize {
        if self.is_seeded() {
            return 0;
        }
        let entries = seed_loader::load_accounts(path.as_ref());
        self.seed_entries(entries)
    }

    /// Populate the registry from already-parsed entries.
    ///
    /// The emptiness check and the creation loop run under a single write
    /// lock, so concurrent seeders cannot both populate the registry.
    pub fn seed_entries<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let mut inner = self.write();
        if inner.seeded || !inner.accounts.is_empty() {
            tracing::debug!("Registry already seeded, skipping");
            return 0;
        }

        let mut created = 0;
        for (identifier, balance) in entries {
            match inner.insert(&identifier, balance) {
                Ok(_) => {
                    created += 1;
                    tracing::info!(
                        "Created account {} with balance ${}",
                        identifier,
                        format_money(balance)
                    );
                }
                Err(err) => {
                    tracing::warn!("Failed to create account {}: {}", identifier, err);
                }
            }
        }
        inner.seeded = true;

        created
    }

    /// Remove every account and forget that seeding happened.
    ///
    /// Test use only; not reachable over HTTP.
    #[cfg(test)]
    pub fn reset(&self) {
        let mut inner = self.write();
        inner.accounts.clear();
        inner.seeded = false;
        tracing::info!("Registry reset");
    }

    /// `reset` followed by `seed_from`.
    #[cfg(test)]
    pub fn reload(&self, path: impl AsRef<Path>) -> usize {
        self.reset();
        self.seed_from(path)
    }

    // The map is only ever modified by a single `insert`/`clear` call, so a
    // poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
