//! Build script for ivf-api
//!
//! Stamps the binary with the source revision, build time (UTC) and cargo
//! profile. Exposed as `IVF_GIT_REV`, `IVF_BUILD_TIME` and `IVF_BUILD_PROFILE`.

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    // `-dirty` suffix when the working tree has local edits
    let revision = git(&["describe", "--always", "--dirty", "--abbrev=8"])
        .unwrap_or_else(|| "unknown".to_string());

    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    if let Some(git_dir) = git(&["rev-parse", "--git-dir"]) {
        println!("cargo:rerun-if-changed={}/HEAD", git_dir);
    }
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-env=IVF_GIT_REV={}", revision);
    println!("cargo:rustc-env=IVF_BUILD_TIME={}", built_at);
    println!("cargo:rustc-env=IVF_BUILD_PROFILE={}", profile);
}
