use std::io::Read;

use csv::{StringRecord, StringRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Open,
    Deposit,
    Withdraw,
}

/// One row of a ledger script.
///
/// For `open` rows the amount is the initial balance.
#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub account: String,
    pub amount: Option<Decimal>,
}

/// Parses ledger requests in CSV format, yielding each row with its line number
pub struct CsvRequestParser<R> {
    headers: StringRecord,
    records: StringRecordsIntoIter<R>,
}

impl<R> CsvRequestParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> csv::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);
        let headers = reader.headers()?.clone();

        Ok(Self {
            headers,
            records: reader.into_records(),
        })
    }
}

impl<R> Iterator for CsvRequestParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Request>);

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.records.next()?;
        Some(match row {
            Ok(record) => {
                let line = record.position().map_or(0, |pos| pos.line());
                (line, record.deserialize(Some(&self.headers)))
            }
            Err(err) => (err.position().map_or(0, |pos| pos.line()), Err(err)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_requests() {
        let input = "type, account, amount\n\
                     open, NI-41-BCCE-00000010022400183307, 1000\n\
                     deposit,NI-41-BCCE-00000010022400183307,0.25\n\
                     withdraw,NI-41-BCCE-00000010022400183307\n\
                     transfer,NI-41-BCCE-00000010022400183307,1\n";
        let rows: Vec<_> = CsvRequestParser::new(input.as_bytes()).unwrap().collect();
        assert_eq!(rows.len(), 4);

        let (line, open) = &rows[0];
        let open = open.as_ref().unwrap();
        assert_eq!(*line, 2);
        assert_eq!(open.kind, RequestKind::Open);
        assert_eq!(open.account, "NI-41-BCCE-00000010022400183307");
        assert_eq!(open.amount, Some(Decimal::new(1000, 0)));

        let (_, deposit) = &rows[1];
        assert_eq!(deposit.as_ref().unwrap().amount, Some(Decimal::new(25, 2)));

        let (line, withdraw) = &rows[2];
        assert_eq!(*line, 4);
        assert_eq!(withdraw.as_ref().unwrap().amount, None);

        let (line, unknown) = &rows[3];
        assert_eq!(*line, 5);
        assert!(unknown.is_err());
    }
}
