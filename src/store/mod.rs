use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{
    account::{Account, AccountError, AccountNumber},
    command::{CommandError, TransactionRequest},
    transaction::Transaction,
};

pub mod in_memory_store;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error("Account `{0}` not found")]
    AccountNotFound(String),
}

/// Transactions of one account together with its current balance.
///
/// `final_balance` is absent when no account carries the number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountHistory {
    pub transactions: Vec<Transaction>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub final_balance: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub account_number: AccountNumber,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl From<&Account> for BalanceResponse {
    fn from(account: &Account) -> Self {
        Self {
            account_number: account.account_number().clone(),
            balance: account.balance(),
        }
    }
}

/// Accounts plus the append-only transaction log.
///
/// Every mutating operation validates first and mutates only on success, so a
/// rejected call leaves the ledger untouched. Implementations must make each
/// operation atomic with respect to all others.
pub trait LedgerStore: Send + Sync {
    /// All accounts in creation order.
    fn list_accounts(&self) -> Vec<Account>;

    fn create_account(
        &self,
        account_number: &str,
        initial_balance: Decimal,
    ) -> Result<Account, LedgerError>;

    fn check_balance(&self, account_number: &str) -> Result<Decimal, LedgerError>;

    /// True iff the number is well formed and an account carries it.
    fn is_valid_account(&self, account_number: &str) -> bool;

    fn deposit(&self, request: &TransactionRequest) -> Result<Transaction, LedgerError>;

    fn withdraw(&self, request: &TransactionRequest) -> Result<Transaction, LedgerError>;

    /// Transactions of the account in ascending id order, empty for unknown accounts.
    fn transactions_for_account(&self, account_number: &str) -> Vec<Transaction>;

    fn all_transactions(&self) -> Vec<Transaction>;

    fn account_history(&self, account_number: &str) -> AccountHistory;
}
