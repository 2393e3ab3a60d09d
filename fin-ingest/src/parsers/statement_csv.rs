//! Savings-account statement CSV reader.
//!
//! Expected header (extra columns are ignored, order does not matter):
//! Date,Narration,Value Dt,Withdrawal Amt.,Deposit Amt.,Closing Balance
//!
//! The first malformed row aborts the whole read; there is no partial result.
//!
//! Row numbers in errors count data records, starting at 1 for the first
//! record after the header. Truly empty lines are not records and are not
//! counted, so after one the row number no longer matches the file line.
//! A line of empty cells (`,,,,`) is a record: it is counted, then skipped.

use fin_core::{FinError, FinResult, Transaction};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::normalizer::normalize;
use crate::types::{REQUIRED_COLUMNS, RawRecord};

/// Positions of the required columns within a header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    narration: usize,
    withdrawal: usize,
    deposit: usize,
    closing_balance: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> FinResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| FinError::MissingColumn {
                    column: name.to_string(),
                })
        };
        let [date, narration, withdrawal, deposit, closing_balance] = REQUIRED_COLUMNS;
        Ok(Self {
            date: find(date)?,
            narration: find(narration)?,
            withdrawal: find(withdrawal)?,
            deposit: find(deposit)?,
            closing_balance: find(closing_balance)?,
        })
    }

    fn raw(&self, record: &csv::StringRecord) -> RawRecord {
        let cell = |i: usize| record.get(i).unwrap_or("").to_string();
        RawRecord {
            date: cell(self.date),
            narration: cell(self.narration),
            withdrawal: cell(self.withdrawal),
            deposit: cell(self.deposit),
            closing_balance: cell(self.closing_balance),
        }
    }
}

/// Read a statement file into transactions, in file order.
pub fn parse_statement_csv(path: impl AsRef<Path>) -> FinResult<Vec<Transaction>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FinError::Io(format!("{}: {e}", path.display())))?;
    let txns = parse_statement_reader(file)?;
    info!(path = %path.display(), rows = txns.len(), "parsed statement");
    Ok(txns)
}

/// Read statement CSV from any reader. Fully blank rows are skipped.
pub fn parse_statement_reader<R: Read>(reader: R) -> FinResult<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut txns = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(csv_error)?;
        let raw = columns.raw(&record);
        if raw.is_blank() {
            debug!(row, "skipping blank row");
            continue;
        }
        txns.push(normalize(row, &raw)?);
    }

    Ok(txns)
}

fn csv_error(e: csv::Error) -> FinError {
    FinError::Csv(e.to_string())
}
