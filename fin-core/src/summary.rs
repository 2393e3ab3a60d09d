//! Per-month summary entities derived from a transaction set.
//!
//! All of these are recomputed from scratch on every report run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::YearMonth;

/// Sum of debits and credits within one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub bucket: YearMonth,
    pub total_debits: Decimal,
    pub total_credits: Decimal,
}

impl MonthlyTotals {
    pub fn new(bucket: YearMonth) -> Self {
        Self {
            bucket,
            total_debits: Decimal::ZERO,
            total_credits: Decimal::ZERO,
        }
    }

    /// Net savings: credits minus debits. None if it leaves the `Decimal` range.
    pub fn savings(&self) -> Option<Decimal> {
        self.total_credits.checked_sub(self.total_debits)
    }
}

/// Balance on the last transaction (in input order) of a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingSnapshot {
    pub bucket: YearMonth,
    pub closing_balance: Decimal,
}

/// One row of the savings trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsRecord {
    pub bucket: YearMonth,
    pub savings: Decimal,
    /// Percent change against the previous bucket's savings.
    ///
    /// Always `Some(0)` for the first bucket. `None` when the previous
    /// bucket's savings was exactly zero.
    pub savings_pct_change: Option<Decimal>,
    pub closing_balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_savings_is_credits_minus_debits() {
        let mut totals = MonthlyTotals::new(YearMonth::new(2023, 1).unwrap());
        assert_eq!(totals.savings(), Some(Decimal::ZERO));
        totals.total_debits = dec!(150);
        totals.total_credits = dec!(30);
        assert_eq!(totals.savings(), Some(dec!(-120)));
    }

    #[test]
    fn test_savings_out_of_range() {
        let mut totals = MonthlyTotals::new(YearMonth::new(2023, 1).unwrap());
        totals.total_credits = Decimal::MAX;
        totals.total_debits = dec!(-1);
        assert_eq!(totals.savings(), None);
    }

    #[test]
    fn test_undefined_pct_serializes_as_null() {
        let rec = SavingsRecord {
            bucket: YearMonth::new(2023, 3).unwrap(),
            savings: dec!(10),
            savings_pct_change: None,
            closing_balance: dec!(500),
        };
        let v = serde_json::to_value(&rec).unwrap();
        assert!(v["savings_pct_change"].is_null());
        assert_eq!(v["bucket"], "2023 Mar");
    }
}
