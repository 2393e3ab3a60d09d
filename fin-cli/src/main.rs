use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use fin_ingest::parse_statement_csv;
use fin_report::{Section, build_report};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod open;
mod render;
mod state;

use config::{Config, OutputFormat};
use render::{Templates, render_html, render_json};

#[derive(Parser, Debug)]
#[command(
    name = "fin",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FIN_BUILD_SHA"), ")"),
    about = "Monthly summaries from a bank statement CSV"
)]
struct Cli {
    /// Config file (default: $FIN_HOME/config.toml, else ~/.fin/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the monthly report for a statement
    Report(ReportArgs),

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Statement CSV (default: [report].statement, else ./statement.csv)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Entries kept per month in the top debits/credits tables
    #[arg(long)]
    top_n: Option<usize>,

    /// Section to include; repeat to pick several (default: all)
    #[arg(long = "section")]
    sections: Vec<Section>,

    /// Output file
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Open the report once written
    #[arg(long)]
    open: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Report(args) => {
            let cfg = config::load_config(cli.config.as_deref())?;
            run_report(apply_args(cfg, args))?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
        },
    }

    Ok(())
}

/// Command-line flags win over the config file
fn apply_args(mut cfg: Config, args: ReportArgs) -> Config {
    if let Some(csv) = args.csv {
        cfg.report.statement = csv;
    }
    if let Some(n) = args.top_n {
        cfg.report.top_n = n;
    }
    if !args.sections.is_empty() {
        cfg.report.sections = args.sections;
    }
    if let Some(out) = args.out {
        cfg.output.path = out;
    }
    if let Some(format) = args.format {
        cfg.output.format = format;
    }
    cfg.output.open |= args.open;
    cfg
}

fn run_report(cfg: Config) -> Result<()> {
    let csv_path = &cfg.report.statement;
    if !csv_path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv_path.display());
    }

    let txns = parse_statement_csv(csv_path)
        .with_context(|| format!("parsing {}", csv_path.display()))?;
    let report = build_report(&txns, &cfg.report.options()).map_err(|e| {
        if e.is_internal() {
            anyhow!("internal consistency error, report not written: {e}")
        } else {
            anyhow::Error::from(e).context("building report")
        }
    })?;

    let body = match cfg.output.format {
        OutputFormat::Html => render_html(&report, &Templates::load(&cfg.output)?),
        OutputFormat::Json => render_json(&report)?,
    };

    let out = &cfg.output.path;
    if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    println!("Writing to {}", out.display());
    fs::write(out, body).with_context(|| format!("write {}", out.display()))?;

    println!(
        "Parsed {} transactions from {}; {} sections",
        txns.len(),
        csv_path.display(),
        report.sections.len()
    );
    info!(path = %out.display(), format = ?cfg.output.format, "report written");

    if cfg.output.open {
        let abs = fs::canonicalize(out).unwrap_or_else(|_| out.clone());
        if let Err(e) = open::open_report(&abs) {
            warn!(error = %e, "could not open report");
        }
    }

    Ok(())
}
