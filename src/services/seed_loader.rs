//! Seed file parsing.
//!
//! A seed file lists one account per line, either `identifier,balance` or
//! `identifier balance`. Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! # account, opening balance
//! 123456,1000.00
//! 789012 2500
//! ```
//!
//! Loading never fails: malformed lines are skipped with a warning, and a
//! missing, unreadable or effectively empty file yields `default_accounts()`.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Accounts used when the seed file provides none.
pub fn default_accounts() -> Vec<(String, Decimal)> {
    vec![
        ("123456".to_string(), Decimal::from(1000)),
        ("789012".to_string(), Decimal::from(2500)),
        ("345678".to_string(), Decimal::from(500)),
    ]
}

/// Read `path` and return its `(identifier, balance)` entries.
pub fn load_accounts(path: &Path) -> Vec<(String, Decimal)> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("{} not found. Using default accounts.", path.display());
            return default_accounts();
        }
        Err(err) => {
            tracing::warn!(
                "Error reading {}: {}. Using default accounts instead.",
                path.display(),
                err
            );
            return default_accounts();
        }
    };

    let accounts = parse_accounts(&contents);
    if accounts.is_empty() {
        tracing::warn!("No valid accounts found in file. Using default accounts.");
        return default_accounts();
    }

    tracing::info!("Loaded {} accounts from {}", accounts.len(), path.display());
    accounts
}

/// Parse seed file contents, skipping anything that is not a valid entry.
///
/// Does not apply the default fallback.
pub fn parse_accounts(contents: &str) -> Vec<(String, Decimal)> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            match parse_line(line) {
                Ok(entry) => Some(entry),
                Err(reason) => {
                    tracing::warn!("Skipping line {}: {} ({})", index + 1, line, reason);
                    None
                }
            }
        })
        .collect()
}

fn parse_line(line: &str) -> Result<(String, Decimal), &'static str> {
    let (identifier, balance) = match line.split_once(',') {
        Some(fields) => fields,
        None => {
            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(identifier), Some(balance), None) => (identifier, balance),
                _ => return Err("invalid format"),
            }
        }
    };

    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err("missing account number");
    }

    let balance = parse_balance(balance.trim()).ok_or("invalid balance")?;
    if balance < Decimal::ZERO {
        return Err("negative balance");
    }

    Ok((identifier.to_string(), balance))
}

fn parse_balance(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
