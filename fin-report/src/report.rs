//! Report pipeline: one pure pass from a transaction set to the requested sections.

use fin_core::{FinResult, MonthlyTotals, RankField, SavingsRecord, Transaction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::ranker::{TopTransactions, rank};
use crate::savings;
use crate::snapshot::snapshot;

pub const DEFAULT_TOP_N: usize = 5;

/// A report section, named after the table title it renders under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    SavingsPerMonth,
    DebitsCreditsPerMonth,
    TopCreditsPerMonth,
    TopDebitsPerMonth,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::SavingsPerMonth,
        Section::DebitsCreditsPerMonth,
        Section::TopCreditsPerMonth,
        Section::TopDebitsPerMonth,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::SavingsPerMonth => "savings_per_month",
            Section::DebitsCreditsPerMonth => "debits_credits_per_month",
            Section::TopCreditsPerMonth => "top_credits_per_month",
            Section::TopDebitsPerMonth => "top_debits_per_month",
        }
    }

    /// Whether the bucket is rendered as a row label
    pub fn shows_bucket_index(&self) -> bool {
        matches!(self, Section::DebitsCreditsPerMonth)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.name() == s.trim())
            .ok_or_else(|| {
                let names: Vec<&str> = Section::ALL.iter().map(|s| s.name()).collect();
                format!("unknown section '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// What to compute; passed in explicitly on every run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub top_n: usize,
    pub sections: Vec<Section>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            sections: Section::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", content = "rows", rename_all = "snake_case")]
pub enum ReportSection {
    SavingsPerMonth(Vec<SavingsRecord>),
    DebitsCreditsPerMonth(Vec<MonthlyTotals>),
    TopCreditsPerMonth(TopTransactions),
    TopDebitsPerMonth(TopTransactions),
}

impl ReportSection {
    pub fn section(&self) -> Section {
        match self {
            ReportSection::SavingsPerMonth(_) => Section::SavingsPerMonth,
            ReportSection::DebitsCreditsPerMonth(_) => Section::DebitsCreditsPerMonth,
            ReportSection::TopCreditsPerMonth(_) => Section::TopCreditsPerMonth,
            ReportSection::TopDebitsPerMonth(_) => Section::TopDebitsPerMonth,
        }
    }
}

/// Derived entities for one run, in the requested section order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub transaction_count: usize,
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn get(&self, section: Section) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.section() == section)
    }
}

pub fn build_report(txns: &[Transaction], opts: &ReportOptions) -> FinResult<Report> {
    let sections = opts
        .sections
        .iter()
        .map(|section| build_section(txns, *section, opts.top_n))
        .collect::<FinResult<Vec<_>>>()?;

    info!(
        transactions = txns.len(),
        sections = sections.len(),
        top_n = opts.top_n,
        "built report"
    );

    Ok(Report {
        transaction_count: txns.len(),
        sections,
    })
}

fn build_section(txns: &[Transaction], section: Section, top_n: usize) -> FinResult<ReportSection> {
    let built = match section {
        Section::SavingsPerMonth => {
            let totals = aggregate(txns)?;
            let snapshots = snapshot(txns)?;
            ReportSection::SavingsPerMonth(savings::build(&totals, &snapshots)?)
        }
        Section::DebitsCreditsPerMonth => ReportSection::DebitsCreditsPerMonth(aggregate(txns)?),
        Section::TopCreditsPerMonth => {
            ReportSection::TopCreditsPerMonth(rank(txns, RankField::Credit, top_n))
        }
        Section::TopDebitsPerMonth => {
            ReportSection::TopDebitsPerMonth(rank(txns, RankField::Debit, top_n))
        }
    };
    debug!(section = %section, "section built");
    Ok(built)
}
