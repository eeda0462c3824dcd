use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::{AccountNumber, InvalidAccountNumber},
    transaction::TransactionKind,
};

/// Body of an account creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccountRequest {
    pub account_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Body of a deposit or withdraw request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub account_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl TransactionRequest {
    pub fn new(account_number: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_number: account_number.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAccountCommand {
    pub account_number: AccountNumber,
    pub initial_balance: Decimal,
}

#[derive(Debug, Clone)]
pub struct TransactionCommand {
    pub account_number: AccountNumber,
    pub kind: TransactionKind,
    pub amount: Decimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Initial balance cannot be negative")]
    InvalidBalance,
    #[error(transparent)]
    InvalidAccountNumber(#[from] InvalidAccountNumber),
    #[error("Duplicate account number `{0}` is not allowed")]
    DuplicateAccount(AccountNumber),
    #[error("Invalid account number for {kind}")]
    InvalidAccount { kind: TransactionKind },
    #[error("Amount must be positive for {kind}")]
    InvalidAmount { kind: TransactionKind },
}

impl CreateAccountCommand {
    /// Rules are checked in order: balance sign, number format, uniqueness.
    pub fn parse(
        account_number: &str,
        initial_balance: Decimal,
        exists: impl FnOnce(&AccountNumber) -> bool,
    ) -> Result<Self, CommandError> {
        if initial_balance < Decimal::ZERO {
            return Err(CommandError::InvalidBalance);
        }
        let account_number = AccountNumber::parse(account_number)?;
        if exists(&account_number) {
            return Err(CommandError::DuplicateAccount(account_number));
        }
        Ok(Self {
            account_number,
            initial_balance,
        })
    }
}

impl TransactionCommand {
    pub fn parse(
        kind: TransactionKind,
        request: &TransactionRequest,
        exists: impl FnOnce(&AccountNumber) -> bool,
    ) -> Result<Self, CommandError> {
        let Some(account_number) = AccountNumber::parse(&request.account_number)
            .ok()
            .filter(exists)
        else {
            return Err(CommandError::InvalidAccount { kind });
        };
        if request.amount <= Decimal::ZERO {
            return Err(CommandError::InvalidAmount { kind });
        }
        Ok(Self {
            account_number,
            kind,
            amount: request.amount,
        })
    }
}
