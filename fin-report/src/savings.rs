//! Savings trend: net savings per month and its change against the month before.
//!
//! The percentage change is the only sequential step in the report, so it is
//! written as a fold carrying the previous month's savings.

use fin_core::{ClosingSnapshot, FinError, FinResult, MonthlyTotals, SavingsRecord, YearMonth};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Walk `totals` in order, pairing each bucket with its closing snapshot.
pub fn build(
    totals: &[MonthlyTotals],
    snapshots: &IndexMap<YearMonth, ClosingSnapshot>,
) -> FinResult<Vec<SavingsRecord>> {
    let (records, _) = totals.iter().try_fold(
        (Vec::<SavingsRecord>::with_capacity(totals.len()), None::<Decimal>),
        |(mut records, previous), month| {
            let snap = snapshots
                .get(&month.bucket)
                .ok_or_else(|| FinError::MissingSnapshot {
                    bucket: month.bucket.to_string(),
                })?;
            let savings = month.savings().ok_or_else(|| FinError::AmountOverflow {
                bucket: month.bucket.to_string(),
                column: "savings".to_string(),
            })?;
            records.push(SavingsRecord {
                bucket: month.bucket,
                savings,
                savings_pct_change: pct_change(previous, savings),
                closing_balance: snap.closing_balance,
            });
            Ok::<_, FinError>((records, Some(savings)))
        },
    )?;
    Ok(records)
}

/// `(current - previous) / |previous| * 100`.
///
/// No previous month gives `Some(0)`. A previous value of exactly zero gives
/// `None` (undefined), as does arithmetic overflow.
pub fn pct_change(previous: Option<Decimal>, current: Decimal) -> Option<Decimal> {
    match previous {
        None => Some(Decimal::ZERO),
        Some(prev) if prev.is_zero() => None,
        Some(prev) => current
            .checked_sub(prev)
            .and_then(|delta| delta.checked_div(prev.abs()))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn month(m: u32, debits: Decimal, credits: Decimal) -> MonthlyTotals {
        MonthlyTotals {
            bucket: YearMonth::new(2023, m).unwrap(),
            total_debits: debits,
            total_credits: credits,
        }
    }

    fn snaps(totals: &[MonthlyTotals]) -> IndexMap<YearMonth, ClosingSnapshot> {
        totals
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let snap = ClosingSnapshot {
                    bucket: t.bucket,
                    closing_balance: Decimal::from(1000 + i as i64),
                };
                (t.bucket, snap)
            })
            .collect()
    }

    #[test]
    fn test_pct_change_from_negative_savings() {
        let totals = vec![month(1, dec!(150), dec!(30)), month(2, dec!(100), dec!(40))];
        let trend = build(&totals, &snaps(&totals)).unwrap();
        assert_eq!(trend[0].savings, dec!(-120));
        assert_eq!(trend[0].savings_pct_change, Some(dec!(0)));
        assert_eq!(trend[1].savings, dec!(-60));
        assert_eq!(trend[1].savings_pct_change, Some(dec!(50.0)));
        assert_eq!(trend[1].closing_balance, dec!(1001));
    }

    #[test]
    fn test_first_bucket_always_zero() {
        for (debits, credits) in [(dec!(0), dec!(0)), (dec!(500), dec!(1)), (dec!(1), dec!(500))] {
            let totals = vec![month(1, debits, credits)];
            let trend = build(&totals, &snaps(&totals)).unwrap();
            assert_eq!(trend[0].savings_pct_change, Some(Decimal::ZERO));
        }
    }

    #[test]
    fn test_previous_zero_is_undefined() {
        let totals = vec![
            month(1, dec!(100), dec!(100)),
            month(2, dec!(0), dec!(250)),
            month(3, dec!(0), dec!(500)),
        ];
        let trend = build(&totals, &snaps(&totals)).unwrap();
        assert_eq!(trend[1].savings_pct_change, None);
        // The chain continues from February's savings
        assert_eq!(trend[2].savings_pct_change, Some(dec!(100)));
    }

    #[test]
    fn test_drop_in_savings_is_negative() {
        assert_eq!(pct_change(Some(dec!(200)), dec!(50)), Some(dec!(-75)));
        assert_eq!(pct_change(Some(dec!(-50)), dec!(-100)), Some(dec!(-100)));
    }

    #[test]
    fn test_change_out_of_range_is_undefined() {
        let big = Decimal::from_i128_with_scale(7 * 10_i128.pow(28), 0);
        let totals = vec![month(1, big, dec!(0)), month(2, dec!(0), big)];
        let trend = build(&totals, &snaps(&totals)).unwrap();
        assert_eq!(trend[0].savings, -big);
        assert_eq!(trend[1].savings, big);
        assert_eq!(trend[1].savings_pct_change, None);
        assert_eq!(pct_change(Some(Decimal::MIN), Decimal::MAX), None);
    }

    #[test]
    fn test_missing_snapshot() {
        let totals = vec![month(1, dec!(1), dec!(2)), month(2, dec!(1), dec!(2))];
        let mut partial = snaps(&totals);
        partial.shift_remove(&totals[1].bucket);
        let err = build(&totals, &partial).unwrap_err();
        assert_eq!(
            err,
            FinError::MissingSnapshot {
                bucket: "2023 Feb".to_string()
            }
        );
    }

    #[test]
    fn test_empty_totals() {
        assert!(build(&[], &IndexMap::new()).unwrap().is_empty());
    }
}
