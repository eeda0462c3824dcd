use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    account::{Account, AccountNumber},
    transaction::{Transaction, TransactionId, TransactionKind},
};

#[derive(Debug, Serialize)]
pub struct AccountRow {
    pub account: AccountNumber,
    pub balance: Decimal,
}

impl From<Account> for AccountRow {
    fn from(acc: Account) -> Self {
        Self {
            balance: acc.balance(),
            account: acc.account_number().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub account: AccountNumber,
    pub amount: Decimal,
    pub balance: Decimal,
}

impl From<Transaction> for TransactionRow {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            kind: tx.kind,
            account: tx.account_number,
            amount: tx.amount,
            balance: tx.resulting_balance,
        }
    }
}

pub fn print_rows<W, S>(output: &mut W, rows: impl Iterator<Item = S>) -> anyhow::Result<()>
where
    W: Write,
    S: Serialize,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
