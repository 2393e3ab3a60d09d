//! Per-user directory holding `config.toml`.

use anyhow::{Context, Result, bail};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Overrides the default `~/.fin` location when set
pub const FIN_HOME_ENV: &str = "FIN_HOME";

pub fn fin_home() -> Result<PathBuf> {
    resolve_home(env::var_os(FIN_HOME_ENV), env::var_os("HOME"))
}

/// `$FIN_HOME` when set and non-empty, else `$HOME/.fin`
fn resolve_home(fin_home: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    let fin_home = fin_home.filter(|v| !v.is_empty());
    let home = home.filter(|v| !v.is_empty());
    match (fin_home, home) {
        (Some(dir), _) => Ok(PathBuf::from(dir)),
        (None, Some(home)) => Ok(PathBuf::from(home).join(".fin")),
        (None, None) => bail!("neither {FIN_HOME_ENV} nor HOME is set"),
    }
}

pub fn ensure_fin_home() -> Result<PathBuf> {
    let dir = fin_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create fin home {}", dir.display()))?;
    Ok(dir)
}
