//! fin-report: monthly aggregation, top-N ranking, closing balances and the savings trend

pub mod aggregate;
pub mod ranker;
pub mod report;
pub mod savings;
pub mod snapshot;

pub use aggregate::{aggregate, group_by_bucket};
pub use ranker::{RankedRow, TopTransactions, rank};
pub use report::{Report, ReportOptions, ReportSection, Section, build_report};
pub use savings::build as build_savings;
pub use snapshot::snapshot;
