//! Largest debits/credits per month.
//!
//! Each bucket is sorted descending by the chosen field (stable, so equal
//! values keep input order), cut to N, and only then stripped of zero
//! values. Zeros inside the top-N cut are dropped rather than replaced, so a
//! bucket ends up with fewer than N entries only when it holds fewer than N
//! positive values.

use chrono::NaiveDate;
use fin_core::{RankField, Transaction, YearMonth};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::group_by_bucket;

/// Up to N transactions per bucket, largest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTransactions {
    pub field: RankField,
    pub count: usize,
    /// Every input bucket is present, possibly with an empty list
    pub by_bucket: IndexMap<YearMonth, Vec<Transaction>>,
}

/// Flattened view of a ranking: one row per selected transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRow {
    pub bucket: YearMonth,
    pub date: NaiveDate,
    pub narration: String,
    pub amount: Decimal,
}

impl TopTransactions {
    pub fn get(&self, bucket: &YearMonth) -> &[Transaction] {
        self.by_bucket.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows across all buckets, bucket order first, then rank order
    pub fn rows(&self) -> Vec<RankedRow> {
        self.by_bucket
            .iter()
            .flat_map(|(bucket, txns)| {
                txns.iter().map(move |t| RankedRow {
                    bucket: *bucket,
                    date: t.date,
                    narration: t.narration.clone(),
                    amount: t.amount(self.field),
                })
            })
            .collect()
    }
}

pub fn rank(txns: &[Transaction], field: RankField, count: usize) -> TopTransactions {
    let by_bucket = group_by_bucket(txns)
        .into_iter()
        .map(|(bucket, items)| (bucket, top_in_bucket(items, field, count)))
        .collect();

    TopTransactions {
        field,
        count,
        by_bucket,
    }
}

fn top_in_bucket(mut items: Vec<&Transaction>, field: RankField, count: usize) -> Vec<Transaction> {
    // sort_by is stable: ties stay in input order
    items.sort_by(|a, b| b.amount(field).cmp(&a.amount(field)));
    items
        .into_iter()
        .take(count)
        .filter(|t| t.amount(field) > Decimal::ZERO)
        .cloned()
        .collect()
}
