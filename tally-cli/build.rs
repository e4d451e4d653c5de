use std::process::Command;

/// Expose the short git SHA as `TALLY_BUILD_SHA` for the session banner.
fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace_root = format!("{manifest_dir}/..");

    println!("cargo:rerun-if-changed={workspace_root}/.git/HEAD");

    let sha = Command::new("git")
        .args(["-C", &workspace_root, "rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "dev".to_string());

    println!("cargo:rustc-env=TALLY_BUILD_SHA={sha}");
}
