//! Turns raw statement cells into typed transactions.
//!
//! Dates must be `DD/MM/YY`. Debit/credit cells may be blank (zero) but must
//! otherwise be non-negative numbers; thousands separators are allowed.
//! The closing balance is always required and may be negative. Narrations
//! are kept byte-for-byte, surrounding whitespace included.

use chrono::NaiveDate;
use fin_core::{FinError, FinResult, Transaction};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::types::{CLOSING_BALANCE, DATE, DEPOSITS, RawRecord, WITHDRAWALS};

pub const DATE_FORMAT: &str = "%d/%m/%y";

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("amount regex"));
static BALANCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").expect("balance regex"));

/// Normalize one statement row. `row` is the 1-based data row, used in errors.
pub fn normalize(row: usize, raw: &RawRecord) -> FinResult<Transaction> {
    let date = parse_date(row, &raw.date)?;
    let debit = parse_amount(row, WITHDRAWALS, &raw.withdrawal)?;
    let credit = parse_amount(row, DEPOSITS, &raw.deposit)?;
    let closing_balance = parse_balance(row, &raw.closing_balance)?;

    Ok(Transaction::new(
        date,
        raw.narration.as_str(),
        debit,
        credit,
        closing_balance,
    ))
}

fn parse_date(row: usize, raw: &str) -> FinResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| FinError::MalformedRecord {
        row,
        column: DATE.to_string(),
        value: raw.to_string(),
    })
}

/// Blank means zero; anything else must be a non-negative number.
fn parse_amount(row: usize, column: &str, raw: &str) -> FinResult<Decimal> {
    let cleaned = strip_separators(raw);
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    decimal_matching(&AMOUNT_RE, &cleaned).ok_or_else(|| invalid_amount(row, column, raw))
}

fn parse_balance(row: usize, raw: &str) -> FinResult<Decimal> {
    let cleaned = strip_separators(raw);
    decimal_matching(&BALANCE_RE, &cleaned).ok_or_else(|| invalid_amount(row, CLOSING_BALANCE, raw))
}

fn strip_separators(raw: &str) -> String {
    raw.trim().replace(',', "")
}

fn decimal_matching(re: &Regex, s: &str) -> Option<Decimal> {
    if !re.is_match(s) {
        return None;
    }
    // Out-of-range values still fail here
    Decimal::from_str(s).ok()
}

fn invalid_amount(row: usize, column: &str, raw: &str) -> FinError {
    FinError::InvalidAmount {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    }
}
