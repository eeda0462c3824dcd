//! This module could be a separate crate on its own, to drive [`crate::store`] from a binary,
//! but for simplicity purposes it lives next to the library so integration tests can use it.

use std::io::{Read, Write};

use crate::{
    command::TransactionRequest,
    store::{LedgerError, LedgerStore, in_memory_store::InMemoryLedgerStore},
};
use anyhow::{Context, Result};
use csv_parser::{CsvRequestParser, Request, RequestKind};
use csv_printer::{AccountRow, TransactionRow, print_rows};
use thiserror::Error;
use tracing::{info, warn};

pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum RowError {
    #[error("Malformed row: {0}")]
    Parse(#[from] csv::Error),
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: RequestKind },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// What to print once the script has been replayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Report {
    #[default]
    Accounts,
    Transactions,
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub report: Report,
    pub error_printer: Box<dyn FnMut(u64, RowError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvRequestParser::new(self.input).context("Failed to read CSV header")?;

        let store = InMemoryLedgerStore::new();
        let (mut applied, mut rejected) = (0usize, 0usize);

        for (line, row) in parser {
            match row.map_err(RowError::from).and_then(|req| dispatch(&store, req)) {
                Ok(()) => applied += 1,
                Err(err) => {
                    if !matches!(err, RowError::Ledger(_)) {
                        warn!(line, "skipping row: {err}");
                    }
                    rejected += 1;
                    (self.error_printer)(line, err);
                }
            }
        }
        info!(applied, rejected, "ledger script replayed");

        match self.report {
            Report::Accounts => print_rows(
                self.output,
                store.list_accounts().into_iter().map(AccountRow::from),
            ),
            Report::Transactions => print_rows(
                self.output,
                store.all_transactions().into_iter().map(TransactionRow::from),
            ),
        }
    }
}

fn dispatch(store: &impl LedgerStore, request: Request) -> Result<(), RowError> {
    let Some(amount) = request.amount else {
        return Err(RowError::AmountRequired { kind: request.kind });
    };
    match request.kind {
        RequestKind::Open => {
            store.create_account(&request.account, amount)?;
        }
        RequestKind::Deposit => {
            store.deposit(&TransactionRequest::new(request.account, amount))?;
        }
        RequestKind::Withdraw => {
            store.withdraw(&TransactionRequest::new(request.account, amount))?;
        }
    }
    Ok(())
}
