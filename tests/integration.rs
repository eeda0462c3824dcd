use std::{cell::RefCell, rc::Rc, str::from_utf8};

use bank_ledger::{
    account::AccountError,
    bin_utils::{Report, RowError, Service},
    command::CommandError,
    store::LedgerError,
};

const TEST_FILE: &str = include_str!("transactions.csv");

fn replay(report: Report) -> (String, Vec<(u64, RowError)>) {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let mut output = Vec::new();
    let service = Service {
        input: TEST_FILE.as_bytes(),
        output: &mut output,
        report,
        error_printer: Box::new({
            let errors = Rc::clone(&errors);
            move |line, err| errors.borrow_mut().push((line, err))
        }),
    };
    service.run().unwrap();
    let errors = errors.take();
    (from_utf8(&output).unwrap().to_owned(), errors)
}

#[test]
fn replay_accounts() {
    let (output, _) = replay(Report::Accounts);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "account,balance",
            "NI-41-BCCE-00000010022400183307,1300",
            "NI-07-ABCD-12345678901234567890,1.5",
        ]
    );
}

#[test]
fn replay_transactions() {
    let (output, _) = replay(Report::Transactions);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "id,type,account,amount,balance",
            "1,DEPOSIT,NI-41-BCCE-00000010022400183307,500,1500",
            "2,WITHDRAW,NI-41-BCCE-00000010022400183307,200,1300",
            "3,DEPOSIT,NI-07-ABCD-12345678901234567890,1.5,1.5",
        ]
    );
}

#[test]
fn rejected_rows_are_reported_with_their_line() {
    let (_, errors) = replay(Report::Accounts);
    let lines: Vec<u64> = errors.iter().map(|(line, _)| *line).collect();
    assert_eq!(lines, vec![5, 6, 7, 10, 11, 12]);

    assert!(matches!(
        errors[0].1,
        RowError::Ledger(LedgerError::AccountErr(AccountError::InsufficientFunds { .. }))
    ));
    assert!(matches!(
        errors[1].1,
        RowError::Ledger(LedgerError::CommandErr(CommandError::DuplicateAccount(_)))
    ));
    assert!(matches!(
        errors[2].1,
        RowError::Ledger(LedgerError::CommandErr(CommandError::InvalidBalance))
    ));
    assert!(matches!(
        errors[3].1,
        RowError::Ledger(LedgerError::CommandErr(CommandError::InvalidAmount { .. }))
    ));
    assert!(matches!(
        errors[4].1,
        RowError::Ledger(LedgerError::CommandErr(CommandError::InvalidAccount { .. }))
    ));
    assert!(matches!(errors[5].1, RowError::AmountRequired { .. }));
}
