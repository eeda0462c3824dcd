use std::{borrow::Borrow, fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{
    command::{CreateAccountCommand, TransactionCommand},
    transaction::TransactionKind,
};

const COUNTRY_PREFIX: &[u8] = b"NI-";
const CHECK_DIGITS: usize = 2;
const BANK_CODE_LEN: usize = 4;
const ACCOUNT_DIGITS: usize = 20;

/// Length of `NI-DD-LLLL-` followed by 20 digits.
pub const ACCOUNT_NUMBER_LEN: usize =
    COUNTRY_PREFIX.len() + CHECK_DIGITS + 1 + BANK_CODE_LEN + 1 + ACCOUNT_DIGITS;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid account number `{0}`, expected NI-DD-LLLL- followed by 20 digits")]
pub struct InvalidAccountNumber(pub String);

/// IBAN-like account number, e.g. `NI-41-BCCE-00000010022400183307`.
///
/// A value of this type always matches the structured pattern, so anything
/// holding one does not need to validate it again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn parse(value: &str) -> Result<Self, InvalidAccountNumber> {
        if Self::is_well_formed(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(InvalidAccountNumber(value.to_owned()))
        }
    }

    /// Checks the `NI-DD-LLLL-DDDDDDDDDDDDDDDDDDDD` structure without allocating.
    pub fn is_well_formed(value: &str) -> bool {
        let bytes = value.as_bytes();
        if bytes.len() != ACCOUNT_NUMBER_LEN {
            return false;
        }
        let Some(rest) = bytes.strip_prefix(COUNTRY_PREFIX) else {
            return false;
        };
        let (check, rest) = rest.split_at(CHECK_DIGITS);
        let (sep1, rest) = rest.split_at(1);
        let (bank, rest) = rest.split_at(BANK_CODE_LEN);
        let (sep2, digits) = rest.split_at(1);

        check.iter().all(u8::is_ascii_digit)
            && sep1 == b"-"
            && bank.iter().all(u8::is_ascii_uppercase)
            && sep2 == b"-"
            && digits.iter().all(u8::is_ascii_digit)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountNumber {
    type Err = InvalidAccountNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Borrow<str> for AccountNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Balance change produced by a validated command. Applying it is infallible.
#[derive(Debug, PartialEq, Eq)]
pub struct AccountEvent {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub resulting_balance: Decimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },
    #[error("Balance would overflow")]
    BalanceOverflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    account_number: AccountNumber,
    #[serde(with = "rust_decimal::serde::float")]
    balance: Decimal,
}

impl Account {
    pub fn open(command: CreateAccountCommand) -> Self {
        Self {
            account_number: command.account_number,
            balance: command.initial_balance,
        }
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn apply(&mut self, event: &AccountEvent) {
        self.balance = event.resulting_balance;
    }

    pub fn handle_transaction(
        &self,
        command: &TransactionCommand,
    ) -> Result<AccountEvent, AccountError> {
        let resulting_balance = match command.kind {
            TransactionKind::Deposit => self
                .balance
                .checked_add(command.amount)
                .ok_or(AccountError::BalanceOverflow)?,
            TransactionKind::Withdraw => {
                if self.balance < command.amount {
                    return Err(AccountError::InsufficientFunds {
                        balance: self.balance,
                        requested: command.amount,
                    });
                }
                self.balance - command.amount
            }
        };
        // balance must stay non-negative whatever the command was
        if resulting_balance < Decimal::ZERO {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: command.amount,
            });
        }
        Ok(AccountEvent {
            kind: command.kind,
            amount: command.amount,
            resulting_balance,
        })
    }
}
