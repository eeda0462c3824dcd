use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    account::{Account, AccountNumber},
    command::{CreateAccountCommand, TransactionCommand, TransactionRequest},
    transaction::{Transaction, TransactionId, TransactionKind},
};

use super::{AccountHistory, LedgerError, LedgerStore};

#[derive(Debug, Default)]
struct Ledger {
    accounts: Vec<Account>,
    index: HashMap<AccountNumber, usize>,
    transactions: Vec<Transaction>,
    last_tx_id: TransactionId,
}

impl Ledger {
    fn account(&self, account_number: &str) -> Option<&Account> {
        self.index.get(account_number).map(|&i| &self.accounts[i])
    }

    fn exists(&self, account_number: &AccountNumber) -> bool {
        self.index.contains_key(account_number)
    }

    fn transactions_for(&self, account_number: &str) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|tx| tx.account_number.as_str() == account_number)
            .cloned()
            .collect()
    }

    fn execute(
        &mut self,
        kind: TransactionKind,
        request: &TransactionRequest,
    ) -> Result<Transaction, LedgerError> {
        let command = TransactionCommand::parse(kind, request, |n| self.exists(n))?;
        let Some(&i) = self.index.get(&command.account_number) else {
            return Err(LedgerError::AccountNotFound(request.account_number.clone()));
        };
        let acc = &mut self.accounts[i];
        let evt = acc.handle_transaction(&command)?;
        acc.apply(&evt);

        self.last_tx_id += 1;
        let tx = Transaction::record(self.last_tx_id, command.account_number, &evt);
        self.transactions.push(tx.clone());
        Ok(tx)
    }
}

/// Single-process ledger guarded by one mutex.
///
/// Share it between request handlers through an `Arc`.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    ledger: Mutex<Ledger>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        // mutations happen only after every check passed, so a poisoned
        // ledger is still consistent
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn list_accounts(&self) -> Vec<Account> {
        self.ledger().accounts.clone()
    }

    fn create_account(
        &self,
        account_number: &str,
        initial_balance: Decimal,
    ) -> Result<Account, LedgerError> {
        let mut ledger = self.ledger();
        let command =
            CreateAccountCommand::parse(account_number, initial_balance, |n| ledger.exists(n))?;
        let acc = Account::open(command);
        let i = ledger.accounts.len();
        ledger.index.insert(acc.account_number().clone(), i);
        ledger.accounts.push(acc.clone());
        debug!(account = %acc.account_number(), balance = %acc.balance(), "account opened");
        Ok(acc)
    }

    fn check_balance(&self, account_number: &str) -> Result<Decimal, LedgerError> {
        self.ledger()
            .account(account_number)
            .map(Account::balance)
            .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_owned()))
    }

    fn is_valid_account(&self, account_number: &str) -> bool {
        AccountNumber::is_well_formed(account_number)
            && self.ledger().account(account_number).is_some()
    }

    fn deposit(&self, request: &TransactionRequest) -> Result<Transaction, LedgerError> {
        let tx = self.ledger().execute(TransactionKind::Deposit, request)?;
        debug!(
            id = tx.id,
            account = %tx.account_number,
            amount = %tx.amount,
            balance = %tx.resulting_balance,
            "deposit"
        );
        Ok(tx)
    }

    fn withdraw(&self, request: &TransactionRequest) -> Result<Transaction, LedgerError> {
        let tx = self.ledger().execute(TransactionKind::Withdraw, request)?;
        debug!(
            id = tx.id,
            account = %tx.account_number,
            amount = %tx.amount,
            balance = %tx.resulting_balance,
            "withdrawal"
        );
        Ok(tx)
    }

    fn transactions_for_account(&self, account_number: &str) -> Vec<Transaction> {
        self.ledger().transactions_for(account_number)
    }

    fn all_transactions(&self) -> Vec<Transaction> {
        self.ledger().transactions.clone()
    }

    fn account_history(&self, account_number: &str) -> AccountHistory {
        let ledger = self.ledger();
        AccountHistory {
            transactions: ledger.transactions_for(account_number),
            final_balance: ledger.account(account_number).map(Account::balance),
        }
    }
}
