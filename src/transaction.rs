use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::{AccountEvent, AccountNumber};

pub type TransactionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdraw => "WITHDRAW",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of the append-only transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub account_number: AccountNumber,
    #[serde(with = "rust_decimal::serde::float")]
    pub resulting_balance: Decimal,
}

impl Transaction {
    pub fn record(id: TransactionId, account_number: AccountNumber, event: &AccountEvent) -> Self {
        Self {
            id,
            kind: event.kind,
            amount: event.amount,
            account_number,
            resulting_balance: event.resulting_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use super::*;

    #[test]
    fn serialize_transaction() {
        let tx = Transaction::record(
            7,
            AccountNumber::parse("NI-41-BCCE-00000010022400183307").unwrap(),
            &AccountEvent {
                kind: TransactionKind::Withdraw,
                amount: Decimal::from_u32(200).unwrap(),
                resulting_balance: Decimal::from_f64(1300.5).unwrap(),
            },
        );
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "type": "WITHDRAW",
                "amount": 200.0,
                "accountNumber": "NI-41-BCCE-00000010022400183307",
                "resultingBalance": 1300.5,
            })
        );
    }

    #[test]
    fn kind_display_matches_serialized_name() {
        for kind in [TransactionKind::Deposit, TransactionKind::Withdraw] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.to_string()));
        }
    }
}
