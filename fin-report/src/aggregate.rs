//! Monthly debit/credit totals.
//!
//! Buckets keep the order in which they first appear in the input; the
//! statement is trusted to already be chronological.

use fin_core::{FinError, FinResult, MonthlyTotals, Transaction, YearMonth};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Transactions grouped by bucket, in first-seen bucket order
pub type Buckets<'a> = IndexMap<YearMonth, Vec<&'a Transaction>>;

pub fn group_by_bucket(txns: &[Transaction]) -> Buckets<'_> {
    let mut buckets: Buckets<'_> = IndexMap::new();
    for txn in txns {
        buckets.entry(txn.bucket).or_default().push(txn);
    }
    buckets
}

/// One `MonthlyTotals` per distinct bucket, in first-appearance order.
///
/// Fails with `AmountOverflow` when a bucket's sum leaves the `Decimal` range.
pub fn aggregate(txns: &[Transaction]) -> FinResult<Vec<MonthlyTotals>> {
    let mut totals: IndexMap<YearMonth, MonthlyTotals> = IndexMap::new();
    for txn in txns {
        let entry = totals
            .entry(txn.bucket)
            .or_insert_with(|| MonthlyTotals::new(txn.bucket));
        entry.total_debits = add(entry.total_debits, txn.debit, txn.bucket, "total_debits")?;
        entry.total_credits = add(entry.total_credits, txn.credit, txn.bucket, "total_credits")?;
    }
    Ok(totals.into_values().collect())
}

fn add(total: Decimal, amount: Decimal, bucket: YearMonth, column: &str) -> FinResult<Decimal> {
    total.checked_add(amount).ok_or_else(|| FinError::AmountOverflow {
        bucket: bucket.to_string(),
        column: column.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn txn(y: i32, m: u32, d: u32, debit: Decimal, credit: Decimal) -> Transaction {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Transaction::new(date, "T", debit, credit, dec!(0))
    }

    #[test]
    fn test_sums_per_bucket() {
        let txns = vec![
            txn(2023, 1, 3, dec!(100), dec!(0)),
            txn(2023, 1, 9, dec!(0), dec!(30)),
            txn(2023, 1, 20, dec!(50), dec!(0)),
            txn(2023, 2, 1, dec!(10), dec!(70)),
        ];
        let totals = aggregate(&txns).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].bucket, YearMonth::new(2023, 1).unwrap());
        assert_eq!(totals[0].total_debits, dec!(150));
        assert_eq!(totals[0].total_credits, dec!(30));
        assert_eq!(totals[0].savings(), Some(dec!(-120)));
        assert_eq!(totals[1].total_debits, dec!(10));
        assert_eq!(totals[1].total_credits, dec!(70));
    }

    #[test]
    fn test_keeps_first_appearance_order() {
        // Not re-sorted even when the input is out of calendar order
        let txns = vec![
            txn(2023, 3, 1, dec!(1), dec!(0)),
            txn(2023, 1, 1, dec!(2), dec!(0)),
            txn(2023, 3, 2, dec!(4), dec!(0)),
            txn(2022, 12, 1, dec!(8), dec!(0)),
        ];
        let totals = aggregate(&txns).unwrap();
        let order: Vec<String> = totals.iter().map(|t| t.bucket.to_string()).collect();
        assert_eq!(order, vec!["2023 Mar", "2023 Jan", "2022 Dec"]);
        assert_eq!(totals[0].total_debits, dec!(5));
    }

    #[test]
    fn test_same_month_different_year_are_distinct() {
        let txns = vec![txn(2022, 5, 1, dec!(1), dec!(0)), txn(2023, 5, 1, dec!(1), dec!(0))];
        assert_eq!(aggregate(&txns).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).unwrap().is_empty());
        assert!(group_by_bucket(&[]).is_empty());
    }

    #[test]
    fn test_bucket_sum_out_of_range() {
        let huge = Decimal::MAX;
        let txns = vec![
            txn(2023, 1, 1, dec!(0), dec!(1)),
            txn(2023, 2, 3, huge, dec!(0)),
            txn(2023, 2, 9, huge, dec!(0)),
        ];
        let err = aggregate(&txns).unwrap_err();
        assert_eq!(
            err,
            FinError::AmountOverflow {
                bucket: "2023 Feb".to_string(),
                column: "total_debits".to_string(),
            }
        );
    }

    #[test]
    fn test_group_preserves_row_order() {
        let txns = vec![
            txn(2023, 1, 5, dec!(1), dec!(0)),
            txn(2023, 2, 1, dec!(2), dec!(0)),
            txn(2023, 1, 2, dec!(3), dec!(0)),
        ];
        let groups = group_by_bucket(&txns);
        let jan = &groups[&YearMonth::new(2023, 1).unwrap()];
        assert_eq!(jan.iter().map(|t| t.debit).collect::<Vec<_>>(), vec![dec!(1), dec!(3)]);
    }
}
