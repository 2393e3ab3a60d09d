//! fin-core: ledger types shared by the statement reader and the monthly report engine

pub mod error;
pub mod summary;
pub mod transaction;

pub use error::{FinError, FinResult};
pub use summary::{ClosingSnapshot, MonthlyTotals, SavingsRecord};
pub use transaction::{RankField, Transaction, YearMonth};
