//! End-of-month balances: the closing balance printed on the last row of each bucket.

use fin_core::{ClosingSnapshot, FinError, FinResult, Transaction, YearMonth};
use indexmap::IndexMap;

use crate::aggregate::group_by_bucket;

/// Closing balance per bucket, in first-appearance order.
///
/// "Last" means last in input order, even if an earlier row carries a later date.
pub fn snapshot(txns: &[Transaction]) -> FinResult<IndexMap<YearMonth, ClosingSnapshot>> {
    group_by_bucket(txns)
        .into_iter()
        .map(|(bucket, items)| Ok((bucket, snapshot_bucket(bucket, &items)?)))
        .collect()
}

pub fn snapshot_bucket(bucket: YearMonth, items: &[&Transaction]) -> FinResult<ClosingSnapshot> {
    let last = items.last().ok_or_else(|| FinError::EmptyBucket {
        bucket: bucket.to_string(),
    })?;
    Ok(ClosingSnapshot {
        bucket,
        closing_balance: last.closing_balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn row(m: u32, d: u32, balance: Decimal) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2023, m, d).unwrap();
        Transaction::new(date, "T", dec!(0), dec!(0), balance)
    }

    #[test]
    fn test_last_row_per_bucket() {
        let txns = vec![
            row(1, 2, dec!(100)),
            row(1, 30, dec!(80)),
            row(2, 1, dec!(75)),
            row(2, 15, dec!(300)),
            row(2, 15, dec!(290)),
        ];
        let snaps = snapshot(&txns).unwrap();
        let balances: Vec<Decimal> = snaps.values().map(|s| s.closing_balance).collect();
        assert_eq!(balances, vec![dec!(80), dec!(290)]);
    }

    #[test]
    fn test_input_order_wins_over_date() {
        let txns = vec![row(1, 31, dec!(10)), row(1, 3, dec!(20))];
        let snaps = snapshot(&txns).unwrap();
        assert_eq!(snaps[&YearMonth::new(2023, 1).unwrap()].closing_balance, dec!(20));
    }

    #[test]
    fn test_empty_bucket_is_error() {
        let bucket = YearMonth::new(2023, 4).unwrap();
        let err = snapshot_bucket(bucket, &[]).unwrap_err();
        assert_eq!(
            err,
            FinError::EmptyBucket {
                bucket: "2023 Apr".to_string()
            }
        );
        assert!(err.is_internal());
    }

    #[test]
    fn test_empty_input() {
        assert!(snapshot(&[]).unwrap().is_empty());
    }
}
