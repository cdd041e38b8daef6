use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Stamp the version string pieces `main.rs` reads with `env!`.
fn main() {
    let root = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));

    let build = bump_build_counter(&root.join("BUILD_NUMBER"));
    let version = read_trimmed(&root.join("VERSION"))
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    let profile = match env::var("PROFILE").as_deref() {
        Ok("release") => "release",
        _ => "development",
    };
    let git_hash = short_git_hash().unwrap_or_else(|| "unknown".to_string());

    for (key, value) in [
        ("DSVIZ_VERSION", version),
        ("DSVIZ_BUILD", build.to_string()),
        ("DSVIZ_PROFILE", profile.to_string()),
        ("DSVIZ_GIT_HASH", git_hash),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=VERSION");
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=PROFILE");
}

/// Next build number; an unreadable counter restarts at 1
fn bump_build_counter(path: &Path) -> u64 {
    let next = read_trimmed(path)
        .and_then(|count| count.parse::<u64>().ok())
        .unwrap_or(0)
        + 1;
    if let Err(e) = fs::write(path, next.to_string()) {
        println!("cargo:warning=could not record build number: {}", e);
    }
    next
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn short_git_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
