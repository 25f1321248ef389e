// Build script to inject version information from git tags
//
// Falls back to CARGO_PKG_VERSION when git is unavailable or the tree has no
// tags.

use std::process::Command;

fn main() {
    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=RUNS_SUMMARY_VERSION={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");
}

fn git_version() -> Option<String> {
    // "v0.1.0", "v0.1.0-5-gabc123", "abc123-dirty", ...
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    let base = env!("CARGO_PKG_VERSION");

    match described.strip_prefix('v') {
        // Tagged: keep the tag's version, drop commit distance and dirty suffixes
        Some(tagged) => Some(tagged.split('-').next().unwrap_or(tagged).to_string()),
        // Untagged: package version plus the abbreviated commit
        None => Some(format!("{}-{}", base, described)),
    }
}
