use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::{Command, Stdio};

/// Platform openers, tried in order
const OPENERS: [&str; 2] = ["xdg-open", "open"];

/// Hand the written report to the desktop's default handler.
pub fn open_report(path: &Path) -> Result<()> {
    let opener = OPENERS
        .iter()
        .find_map(|name| which::which(name).ok())
        .with_context(|| format!("no opener found (tried {})", OPENERS.join(", ")))?;

    let status = Command::new(&opener)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("running {}", opener.display()))?;

    if !status.success() {
        bail!("{} failed with status: {}", opener.display(), status);
    }
    Ok(())
}
