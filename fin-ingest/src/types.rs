use serde::{Deserialize, Serialize};

pub const DATE: &str = "Date";
pub const NARRATION: &str = "Narration";
pub const WITHDRAWALS: &str = "Withdrawal Amt.";
pub const DEPOSITS: &str = "Deposit Amt.";
pub const CLOSING_BALANCE: &str = "Closing Balance";

/// Columns a statement must carry, in the order they are looked up
pub const REQUIRED_COLUMNS: [&str; 5] = [DATE, NARRATION, WITHDRAWALS, DEPOSITS, CLOSING_BALANCE];

/// Statement row exactly as read from the file, before any parsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub narration: String,
    pub withdrawal: String,
    pub deposit: String,
    pub closing_balance: String,
}

impl RawRecord {
    pub fn new(
        date: impl Into<String>,
        narration: impl Into<String>,
        withdrawal: impl Into<String>,
        deposit: impl Into<String>,
        closing_balance: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            narration: narration.into(),
            withdrawal: withdrawal.into(),
            deposit: deposit.into(),
            closing_balance: closing_balance.into(),
        }
    }

    /// Exported statements often end with rows of empty cells
    pub fn is_blank(&self) -> bool {
        [
            &self.date,
            &self.narration,
            &self.withdrawal,
            &self.deposit,
            &self.closing_balance,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
    }
}
