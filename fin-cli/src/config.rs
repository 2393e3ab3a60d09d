use anyhow::{Context, Result};
use clap::ValueEnum;
use fin_report::{ReportOptions, Section};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_fin_home, fin_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Statement CSV to read when --csv is not given
    pub statement: PathBuf,
    pub top_n: usize,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    /// Open the written report with the platform opener
    pub open: bool,
    /// Optional HTML wrapping each table; `{title}` and `{content}` slots
    pub section_template: Option<PathBuf>,
    /// Optional HTML page; `{content}` slot
    pub page_template: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Html,
    Json,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let opts = ReportOptions::default();
        Self {
            statement: PathBuf::from("statement.csv"),
            top_n: opts.top_n,
            sections: opts.sections,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("report.html"),
            format: OutputFormat::Html,
            open: false,
            section_template: None,
            page_template: None,
        }
    }
}

impl ReportConfig {
    pub fn options(&self) -> ReportOptions {
        ReportOptions {
            top_n: self.top_n,
            sections: self.sections.clone(),
        }
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(fin_home()?.join("config.toml"))
}

/// Load `path`, or the default location when None. A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => ensure_fin_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg = parse_config(
            r#"
[report]
top_n = 3
sections = ["debits_credits_per_month", "savings_per_month"]
"#,
        )
        .unwrap();
        assert_eq!(cfg.report.top_n, 3);
        assert_eq!(
            cfg.report.sections,
            vec![Section::DebitsCreditsPerMonth, Section::SavingsPerMonth]
        );
        assert_eq!(cfg.report.statement, PathBuf::from("statement.csv"));
        assert_eq!(cfg.output, OutputConfig::default());
    }

    #[test]
    fn test_output_section() {
        let cfg = parse_config(
            r#"
[output]
path = "out/report.json"
format = "json"
open = true
"#,
        )
        .unwrap();
        assert_eq!(cfg.output.format, OutputFormat::Json);
        assert!(cfg.output.open);
        assert_eq!(cfg.report.options(), ReportOptions::default());
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(parse_config("[report]\nsections = [\"monthly\"]\n").is_err());
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let cfg = load_config(Some(Path::new("/nonexistent/fin.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
