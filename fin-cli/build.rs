//! Stamps the `fin` binary with the source revision it was built from.

use std::path::Path;
use std::process::Command;

fn main() {
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");

    let revision = git_output(&workspace, &["describe", "--always", "--dirty", "--abbrev=10"])
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=FIN_BUILD_SHA={revision}");

    // Rebuild when HEAD moves or the index changes
    for tracked in ["HEAD", "index"] {
        let path = workspace.join(".git").join(tracked);
        println!("cargo:rerun-if-changed={}", path.display());
    }
}

/// Trimmed stdout of a successful git command, None otherwise
fn git_output(dir: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git").arg("-C").arg(dir).args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
