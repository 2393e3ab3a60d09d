//! Normalized statement transactions and the month bucket they report under

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Display/parse format of a bucket label, e.g. "2023 Jan"
pub const YEAR_MONTH_FORMAT: &str = "%Y %b";

/// Calendar month a transaction is reported under (the day is dropped).
///
/// Ordering is chronological: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns None when `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    fn first_day(&self) -> NaiveDate {
        // month is validated on construction, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format(YEAR_MONTH_FORMAT))
    }
}

impl FromStr for YearMonth {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(&format!("{} 01", s.trim()), "%Y %b %d")?;
        Ok(Self::from_date(date))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which amount column a ranking looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankField {
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "credit")]
    Credit,
}

/// One statement row after normalization. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Free text, carried through unmodified
    pub narration: String,
    /// Withdrawal amount; blank cells become zero
    pub debit: Decimal,
    /// Deposit amount; blank cells become zero
    pub credit: Decimal,
    /// Running balance as printed on the statement
    pub closing_balance: Decimal,
    pub bucket: YearMonth,
}

impl Transaction {
    /// Build a transaction, deriving its bucket from `date`
    pub fn new(
        date: NaiveDate,
        narration: impl Into<String>,
        debit: Decimal,
        credit: Decimal,
        closing_balance: Decimal,
    ) -> Self {
        Self {
            date,
            narration: narration.into(),
            debit,
            credit,
            closing_balance,
            bucket: YearMonth::from_date(date),
        }
    }

    /// Value of the given amount column
    pub fn amount(&self, field: RankField) -> Decimal {
        match field {
            RankField::Debit => self.debit,
            RankField::Credit => self.credit,
        }
    }
}
