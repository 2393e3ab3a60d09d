//! HTML and JSON rendering of a built report.
//!
//! Each section becomes one bootstrap-styled table titled with the section name.

use anyhow::{Context, Result};
use fin_core::RankField;
use fin_report::{Report, ReportSection, TopTransactions};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::config::OutputConfig;

pub const TABLE_CLASSES: &str = "table table-striped table-hover table-bordered";

pub const DEFAULT_SECTION_TEMPLATE: &str = r#"<section class="container my-4">
  <h2 class="h4">{title}</h2>
  {content}
</section>
"#;

pub const DEFAULT_PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Monthly statement report</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css">
  <style>td, th {{ white-space: nowrap; }}</style>
</head>
<body>
{content}
</body>
</html>
"#;

/// Section and page templates, using `{name}` slots and `{{`/`}}` for literal braces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub section: String,
    pub page: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            section: DEFAULT_SECTION_TEMPLATE.to_string(),
            page: DEFAULT_PAGE_TEMPLATE.to_string(),
        }
    }
}

impl Templates {
    pub fn load(output: &OutputConfig) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            section: read_or(output.section_template.as_deref(), defaults.section)?,
            page: read_or(output.page_template.as_deref(), defaults.page)?,
        })
    }
}

fn read_or(path: Option<&Path>, fallback: String) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("read template {}", p.display())),
        None => Ok(fallback),
    }
}

pub fn render_html(report: &Report, templates: &Templates) -> String {
    let tables: Vec<String> = report
        .sections
        .iter()
        .map(|section| {
            let title = section.section().name();
            let content = section_table(section);
            fill(&templates.section, &[("title", title), ("content", content.as_str())])
        })
        .collect();
    fill(&templates.page, &[("content", tables.join("\n").as_str())])
}

pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize report")
}

fn section_table(section: &ReportSection) -> String {
    match section {
        ReportSection::SavingsPerMonth(trend) => table(
            None,
            &["YM", "Savings", "Savings %", "Closing Balance"],
            trend
                .iter()
                .map(|r| {
                    vec![
                        r.bucket.to_string(),
                        money(r.savings),
                        r.savings_pct_change.map(money).unwrap_or_else(|| "n/a".to_string()),
                        money(r.closing_balance),
                    ]
                })
                .collect(),
        ),
        ReportSection::DebitsCreditsPerMonth(totals) => table(
            Some(("YM", totals.iter().map(|t| t.bucket.to_string()).collect())),
            &["total_debits", "total_credits"],
            totals
                .iter()
                .map(|t| vec![money(t.total_debits), money(t.total_credits)])
                .collect(),
        ),
        ReportSection::TopCreditsPerMonth(top) | ReportSection::TopDebitsPerMonth(top) => {
            ranked_table(top)
        }
    }
}

fn ranked_table(top: &TopTransactions) -> String {
    let amount_column = match top.field {
        RankField::Debit => "Withdrawal Amt.",
        RankField::Credit => "Deposit Amt.",
    };
    table(
        None,
        &["YM", "Date", "Narration", amount_column],
        top.rows()
            .into_iter()
            .map(|r| {
                vec![
                    r.bucket.to_string(),
                    r.date.format("%Y-%m-%d").to_string(),
                    r.narration,
                    money(r.amount),
                ]
            })
            .collect(),
    )
}

/// `index` is an optional (header, labels) pair rendered as a leading `<th>` column
fn table(index: Option<(&str, Vec<String>)>, headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut html = format!("<table class=\"{TABLE_CLASSES}\">\n  <thead>\n    <tr>");
    if let Some((name, _)) = &index {
        html.push_str(&format!("<th>{}</th>", escape(name)));
    }
    for h in headers {
        html.push_str(&format!("<th>{}</th>", escape(h)));
    }
    html.push_str("</tr>\n  </thead>\n  <tbody>\n");

    let labels = index.map(|(_, labels)| labels).unwrap_or_default();
    for (i, row) in rows.iter().enumerate() {
        html.push_str("    <tr>");
        if let Some(label) = labels.get(i) {
            html.push_str(&format!("<th>{}</th>", escape(label)));
        }
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("  </tbody>\n</table>");
    html
}

fn money(d: Decimal) -> String {
    format!("{:.2}", d)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Substitute `{name}` slots. `{{` and `}}` emit literal braces; unknown slots are left as-is.
fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        if rest.starts_with("{{") || rest.starts_with("}}") {
            out.push_str(&rest[..1]);
            rest = &rest[2..];
            continue;
        }
        let slot = rest
            .strip_prefix('{')
            .and_then(|r| r.find('}').map(|end| &r[..end]))
            .and_then(|name| slots.iter().find(|(k, _)| *k == name));
        match slot {
            Some((name, value)) => {
                out.push_str(value);
                rest = &rest[name.len() + 2..];
            }
            None => {
                out.push_str(&rest[..1]);
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
